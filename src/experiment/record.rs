// Experiment record
// Pairs a signal treatment with the report it scored

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::treatment::SignalTreatment;
use crate::error::ScoringError;
use crate::scoring::PerformanceReport;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experiment {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub treatment: SignalTreatment,
    pub report: PerformanceReport,
}

impl Experiment {
    /// Create a new experiment with generated UUID
    pub fn new(treatment: SignalTreatment, report: PerformanceReport) -> Self {
        Experiment {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            treatment,
            report,
        }
    }

    /// Serialize experiment to JSON bytes
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, ScoringError> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    /// Deserialize experiment from JSON bytes
    pub fn from_json_bytes(data: &[u8]) -> Result<Self, ScoringError> {
        Ok(serde_json::from_slice(data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{DetectionSet, LabelSet};
    use crate::scoring::{DetectionScorer, ScorerConfig};

    fn sample_report() -> PerformanceReport {
        let labels = LabelSet::from_intervals(&[(0.0, 1000.0)]).unwrap();
        let detections = DetectionSet::from_intervals(&[(0.0, 1000.0)]).unwrap();
        DetectionScorer::new(ScorerConfig::default())
            .unwrap()
            .score(&labels, &detections, 2000.0)
            .unwrap()
    }

    #[test]
    fn test_experiment_creation() {
        let treatment = SignalTreatment::new(-30, 10, 50).with_overlap(50);
        let first = Experiment::new(treatment, sample_report());
        let second = Experiment::new(treatment, sample_report());

        assert_ne!(first.id, second.id);
        assert_eq!(first.treatment, treatment);
    }

    #[test]
    fn test_experiment_serialization() {
        let experiment = Experiment::new(SignalTreatment::new(-40, 20, 60), sample_report());

        let bytes = experiment.to_json_bytes().unwrap();
        let restored = Experiment::from_json_bytes(&bytes).unwrap();

        assert_eq!(restored.id, experiment.id);
        assert_eq!(restored.treatment, experiment.treatment);
        assert_eq!(restored.report.events, experiment.report.events);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let result = Experiment::from_json_bytes(b"{\"id\": 3}");
        assert!(matches!(result, Err(ScoringError::Serialization(_))));
    }
}
