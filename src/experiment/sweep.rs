// Overlap sweep
// Scores one detection run once per required-overlap percentage

use super::record::Experiment;
use super::treatment::SignalTreatment;
use crate::error::ScoringError;
use crate::events::{DetectionSet, LabelSet};
use crate::scoring::{DetectionScorer, ScorerConfig};

/// One experiment per entry of `overlap_percentages`, in the same order
/// Each percentage replaces `config.min_overlap_ratio` and is stamped onto the treatment
pub fn sweep_overlaps(
    config: &ScorerConfig,
    treatment: &SignalTreatment,
    labels: &LabelSet,
    detections: &DetectionSet,
    total_duration_ms: f64,
    overlap_percentages: &[u32],
) -> Result<Vec<Experiment>, ScoringError> {
    let mut experiments = Vec::with_capacity(overlap_percentages.len());

    for &percent in overlap_percentages {
        let treatment = treatment.with_overlap(percent);
        log::info!("Compute prec/recall for {}", treatment);

        let scorer = DetectionScorer::new(ScorerConfig {
            min_overlap_ratio: percent as f64 / 100.0,
            ..config.clone()
        })?;
        let report = scorer.score(labels, detections, total_duration_ms)?;

        experiments.push(Experiment::new(treatment, report));
    }

    log::info!("Done generating precision/recall measures ({} overlaps)", experiments.len());
    Ok(experiments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_tightens_with_overlap() {
        // Coverage 90%, 40%, 20%
        let labels =
            LabelSet::from_intervals(&[(0.0, 1000.0), (2000.0, 3000.0), (4000.0, 5000.0)])
                .unwrap();
        let detections =
            DetectionSet::from_intervals(&[(0.0, 900.0), (2000.0, 2400.0), (4800.0, 5000.0)])
                .unwrap();
        let treatment = SignalTreatment::new(-30, 10, 50);

        let experiments = sweep_overlaps(
            &ScorerConfig::default(),
            &treatment,
            &labels,
            &detections,
            6000.0,
            &[10, 30, 50, 95],
        )
        .unwrap();

        let tps: Vec<usize> = experiments
            .iter()
            .map(|e| e.report.events.true_pos_events)
            .collect();
        assert_eq!(tps, vec![3, 2, 1, 0]);

        assert_eq!(experiments[2].treatment.min_required_overlap, Some(50));
        assert_eq!(experiments[2].treatment.to_string(), "-30dB_10Hz_50Hz_50perc");
        assert!(experiments
            .iter()
            .all(|e| e.treatment.same_signal_processing(&treatment)));
    }

    #[test]
    fn test_empty_sweep() {
        let experiments = sweep_overlaps(
            &ScorerConfig::default(),
            &SignalTreatment::new(-30, 10, 50),
            &LabelSet::default(),
            &DetectionSet::default(),
            1000.0,
            &[],
        )
        .unwrap();
        assert!(experiments.is_empty());
    }

    #[test]
    fn test_zero_percent_is_rejected() {
        let result = sweep_overlaps(
            &ScorerConfig::default(),
            &SignalTreatment::new(-30, 10, 50),
            &LabelSet::default(),
            &DetectionSet::default(),
            1000.0,
            &[0],
        );
        assert!(matches!(result, Err(ScoringError::InvalidOverlapRatio(_))));
    }
}
