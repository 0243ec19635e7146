// Experiment module
// Signal treatment descriptors, scored experiment records, and overlap sweeps

pub mod record;
pub mod sweep;
pub mod treatment;

pub use record::Experiment;
pub use sweep::sweep_overlaps;
pub use treatment::{SignalTreatment, TreatmentParseError};
