// Scoring errors
// Construction-time validation failures for intervals, sets, and configuration

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("Invalid interval: end {end_ms} ms must be after start {start_ms} ms")]
    InvalidInterval { start_ms: f64, end_ms: f64 },

    #[error("Negative time in interval [{start_ms}, {end_ms}) ms")]
    NegativeTime { start_ms: f64, end_ms: f64 },

    #[error("Non-finite time in interval [{start_ms}, {end_ms}) ms")]
    NonFiniteTime { start_ms: f64, end_ms: f64 },

    #[error("Labeled events overlap: [{first_start_ms}, {first_end_ms}) and [{second_start_ms}, {second_end_ms}) ms")]
    OverlappingLabels {
        first_start_ms: f64,
        first_end_ms: f64,
        second_start_ms: f64,
        second_end_ms: f64,
    },

    #[error("Minimum overlap ratio must be in (0, 1], got {0}")]
    InvalidOverlapRatio(f64),

    #[error("Sample rate must be positive")]
    InvalidSampleRate,

    #[error("Recording duration must be finite and non-negative, got {0} ms")]
    InvalidDuration(f64),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
