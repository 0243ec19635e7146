// Sample-level scoring
// Rasterizes interval sets onto a fixed-rate timeline and accumulates a per-sample confusion matrix

use serde::{Deserialize, Serialize};

use crate::error::ScoringError;
use crate::events::{DetectionSet, Event, LabelSet};

/// Guards against 4.9999999 -> 5 style rounding when mapping ms to samples
const SAMPLE_EPSILON: f64 = 1e-9;

/// Per-sample confusion counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleCounts {
    pub true_pos_samples: usize,
    pub false_pos_samples: usize,
    pub true_neg_samples: usize,
    pub false_neg_samples: usize,
}

impl SampleCounts {
    pub fn total(&self) -> usize {
        self.true_pos_samples + self.false_pos_samples + self.true_neg_samples + self.false_neg_samples
    }
}

/// Boolean series with one tick per sample of the recording
/// Sample `i` sits at `i / sample_rate` seconds and is set when an event covers that instant
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSeries {
    ticks: Vec<bool>,
}

impl SampleSeries {
    /// Rasterize events onto `num_samples` ticks, clipping anything past the end
    pub fn rasterize(events: &[Event], sample_rate: u32, num_samples: usize) -> Self {
        let mut ticks = vec![false; num_samples];

        for event in events {
            let first = first_sample_at_or_after(event.start_ms(), sample_rate).min(num_samples);
            let end = first_sample_at_or_after(event.end_ms(), sample_rate).min(num_samples);
            ticks[first..end].fill(true);
        }

        SampleSeries { ticks }
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        self.ticks.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.ticks.iter().copied()
    }

    /// Number of set ticks
    pub fn count_set(&self) -> usize {
        self.ticks.iter().filter(|&&t| t).count()
    }
}

/// Recording length in whole samples
pub fn num_samples_for(total_duration_ms: f64, sample_rate: u32) -> usize {
    (total_duration_ms * sample_rate as f64 / 1000.0 + SAMPLE_EPSILON).floor() as usize
}

/// Index of the first sample whose instant is at or after `time_ms`
fn first_sample_at_or_after(time_ms: f64, sample_rate: u32) -> usize {
    (time_ms * sample_rate as f64 / 1000.0 - SAMPLE_EPSILON)
        .ceil()
        .max(0.0) as usize
}

/// Per-sample confusion matrix between labels and detections
pub fn score_samples(
    labels: &LabelSet,
    detections: &DetectionSet,
    sample_rate: u32,
    total_duration_ms: f64,
) -> Result<SampleCounts, ScoringError> {
    if sample_rate == 0 {
        return Err(ScoringError::InvalidSampleRate);
    }
    if !total_duration_ms.is_finite() || total_duration_ms < 0.0 {
        return Err(ScoringError::InvalidDuration(total_duration_ms));
    }

    let overhang = labels.max_end_ms().max(detections.max_end_ms());
    if overhang > total_duration_ms {
        log::warn!(
            "Events extend to {:.1} ms, beyond the {:.1} ms recording; clipping",
            overhang,
            total_duration_ms
        );
    }

    let num_samples = num_samples_for(total_duration_ms, sample_rate);
    let truth = SampleSeries::rasterize(labels.events(), sample_rate, num_samples);
    let predicted = SampleSeries::rasterize(detections.events(), sample_rate, num_samples);

    let mut counts = SampleCounts::default();
    for (is_call, is_detected) in truth.iter().zip(predicted.iter()) {
        match (is_call, is_detected) {
            (true, true) => counts.true_pos_samples += 1,
            (false, true) => counts.false_pos_samples += 1,
            (false, false) => counts.true_neg_samples += 1,
            (true, false) => counts.false_neg_samples += 1,
        }
    }

    log::debug!(
        "Sample scoring: {} samples at {} Hz, {} labeled, {} detected",
        num_samples,
        sample_rate,
        truth.count_set(),
        predicted.count_set()
    );

    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_length_matches_duration() {
        let labels = LabelSet::from_intervals(&[(0.0, 500.0)]).unwrap();
        let series = SampleSeries::rasterize(labels.events(), 1000, num_samples_for(2000.0, 1000));

        assert_eq!(series.len(), 2000);
        assert_eq!(series.count_set(), 500);
    }

    #[test]
    fn test_rasterize_half_open() {
        // 10 Hz: samples at 0, 100, 200, ... ms
        let labels = LabelSet::from_intervals(&[(100.0, 300.0)]).unwrap();
        let series = SampleSeries::rasterize(labels.events(), 10, 5);

        let ticks: Vec<bool> = series.iter().collect();
        assert_eq!(ticks, vec![false, true, true, false, false]);
    }

    #[test]
    fn test_rasterize_between_ticks() {
        // [150, 250) contains only the 200 ms instant
        let labels = LabelSet::from_intervals(&[(150.0, 250.0)]).unwrap();
        let series = SampleSeries::rasterize(labels.events(), 10, 5);

        assert_eq!(series.get(1), Some(false));
        assert_eq!(series.get(2), Some(true));
        assert_eq!(series.get(3), Some(false));
        assert_eq!(series.get(5), None);
    }

    #[test]
    fn test_rasterize_clips_past_end() {
        let labels = LabelSet::from_intervals(&[(300.0, 900.0)]).unwrap();
        let series = SampleSeries::rasterize(labels.events(), 10, 5);

        assert_eq!(series.len(), 5);
        assert_eq!(series.count_set(), 2);
    }

    #[test]
    fn test_score_samples_confusion_matrix() {
        let labels = LabelSet::from_intervals(&[(0.0, 400.0)]).unwrap();
        let detections = DetectionSet::from_intervals(&[(200.0, 600.0)]).unwrap();
        let counts = score_samples(&labels, &detections, 10, 1000.0).unwrap();

        assert_eq!(counts.true_pos_samples, 2);
        assert_eq!(counts.false_pos_samples, 2);
        assert_eq!(counts.false_neg_samples, 2);
        assert_eq!(counts.true_neg_samples, 4);
        assert_eq!(counts.total(), 10);
    }

    #[test]
    fn test_score_samples_rejects_bad_input() {
        let labels = LabelSet::default();
        let detections = DetectionSet::default();

        assert!(matches!(
            score_samples(&labels, &detections, 0, 1000.0),
            Err(ScoringError::InvalidSampleRate)
        ));
        assert!(matches!(
            score_samples(&labels, &detections, 10, -1.0),
            Err(ScoringError::InvalidDuration(_))
        ));
    }

    #[test]
    fn test_empty_recording() {
        let counts =
            score_samples(&LabelSet::default(), &DetectionSet::default(), 4000, 0.0).unwrap();
        assert_eq!(counts, SampleCounts::default());
    }
}
