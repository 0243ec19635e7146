// Event interval module
// Ground-truth labels, detector output, and their non-event complements

pub mod types;

pub use types::{DetectionSet, Event, LabelSet};
