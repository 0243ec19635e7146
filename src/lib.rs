// Rumble Score - elephant call detector scoring
// Module declarations

pub mod error;
pub mod events;
pub mod experiment;
pub mod scoring;

pub use error::ScoringError;
pub use events::{DetectionSet, Event, LabelSet};
pub use experiment::{sweep_overlaps, Experiment, SignalTreatment, TreatmentParseError};
pub use scoring::{
    compute_rates, mean_overlaps, overlap_percentages, score_events, score_samples,
    DetectionScorer, EventCounts, OverlapPercentages, PerformanceReport, Rates, SampleCounts,
    SampleSeries, ScorerConfig,
};
