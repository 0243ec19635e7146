// Detection scoring module
// Event-level matching, overlap percentages, sample-level confusion, and rates

pub mod matching;
pub mod overlap;
pub mod rates;
pub mod report;
pub mod samples;
pub mod scorer;

pub use matching::{greedy_match, score_events, score_events_within, EventCounts, Match};
pub use overlap::{mean_overlaps, overlap_percentages, OverlapPercentages, OverlapRecord};
pub use rates::{compute_rates, Rates};
pub use report::PerformanceReport;
pub use samples::{num_samples_for, score_samples, SampleCounts, SampleSeries};
pub use scorer::{DetectionScorer, ScorerConfig};
