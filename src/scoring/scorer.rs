// Detection scorer
// Runs event, non-event, overlap, and sample scoring in one pass

use serde::{Deserialize, Serialize};

use super::matching::score_events_within;
use super::overlap::{mean_overlaps, overlap_percentages};
use super::rates::compute_rates;
use super::report::PerformanceReport;
use super::samples::score_samples;
use crate::error::ScoringError;
use crate::events::{DetectionSet, LabelSet};

/// Settings for a scoring pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorerConfig {
    /// Fraction of a labeled call a detection must cover to count as found
    /// (0.0, 1.0]
    pub min_overlap_ratio: f64,

    /// Sample rate (Hz) of the timeline used for sample-level metrics
    pub sample_rate: u32,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        ScorerConfig {
            min_overlap_ratio: 0.5,
            sample_rate: 4000,
        }
    }
}

impl ScorerConfig {
    pub fn validate(&self) -> Result<(), ScoringError> {
        if !(self.min_overlap_ratio > 0.0 && self.min_overlap_ratio <= 1.0) {
            return Err(ScoringError::InvalidOverlapRatio(self.min_overlap_ratio));
        }
        if self.sample_rate == 0 {
            return Err(ScoringError::InvalidSampleRate);
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct DetectionScorer {
    config: ScorerConfig,
}

impl DetectionScorer {
    /// Create a scorer, rejecting an unusable configuration
    pub fn new(config: ScorerConfig) -> Result<Self, ScoringError> {
        config.validate()?;
        Ok(DetectionScorer { config })
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    /// Score one recording
    /// Non-events and sample ticks both cover `[0, total_duration_ms)`
    pub fn score(
        &self,
        labels: &LabelSet,
        detections: &DetectionSet,
        total_duration_ms: f64,
    ) -> Result<PerformanceReport, ScoringError> {
        if !total_duration_ms.is_finite() || total_duration_ms < 0.0 {
            return Err(ScoringError::InvalidDuration(total_duration_ms));
        }

        log::debug!(
            "Scoring {} detections against {} labels ({:.1} ms, min overlap {:.2})",
            detections.len(),
            labels.len(),
            total_duration_ms,
            self.config.min_overlap_ratio
        );

        let events = score_events_within(
            labels,
            detections,
            self.config.min_overlap_ratio,
            total_duration_ms,
        );
        let samples = score_samples(
            labels,
            detections,
            self.config.sample_rate,
            total_duration_ms,
        )?;

        let label_gaps = labels.non_events(total_duration_ms);
        let detected_gaps = detections.non_events(total_duration_ms);

        let report = PerformanceReport {
            min_required_overlap: self.config.min_overlap_ratio,
            event_rates: compute_rates(
                events.true_pos_events,
                events.false_pos_events,
                events.false_neg_events,
            ),
            non_event_rates: compute_rates(
                events.num_true_pos_detected_non_events,
                events.num_false_pos_detected_non_events,
                events.num_false_neg_detected_non_events,
            ),
            sample_rates: compute_rates(
                samples.true_pos_samples,
                samples.false_pos_samples,
                samples.false_neg_samples,
            ),
            mean_overlaps_events: overlap_percentages(labels, detections).mean(),
            mean_overlaps_non_events: mean_overlaps(&label_gaps, &detected_gaps).mean(),
            events,
            samples,
        };

        log::info!(
            "Events: recall {:.3}, precision {:.3}, f1 {:.3} | samples: recall {:.3}, precision {:.3}, f1 {:.3}",
            report.event_rates.recall,
            report.event_rates.precision,
            report.event_rates.f1,
            report.sample_rates.recall,
            report.sample_rates.precision,
            report.sample_rates.f1
        );

        Ok(report)
    }
}
