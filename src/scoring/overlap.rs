// Overlap percentages between detections and labels
// Lazy per-detection sequences plus the best-label lookup shared with matching

use serde::{Deserialize, Serialize};

use crate::events::{DetectionSet, Event, LabelSet};

/// Best overlap found for one detection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlapRecord {
    /// Position of the detection in its (start-sorted) set
    pub detection_index: usize,

    /// Label with the highest coverage, if any label overlaps at all
    pub label_index: Option<usize>,

    /// Coverage of that label, as a percentage [0, 100]
    pub percent: f64,
}

/// Index range of `labels` that can intersect `detection`
/// `labels` must be start-sorted and non-overlapping, so ends are sorted too
pub(crate) fn candidate_labels(detection: &Event, labels: &[Event]) -> std::ops::Range<usize> {
    let first = labels.partition_point(|l| l.end_ms() <= detection.start_ms());
    let last = first + labels[first..].partition_point(|l| l.start_ms() < detection.end_ms());
    first..last
}

/// Label with the highest coverage by `detection`
/// Ties go to the earlier label; `None` when nothing overlaps
pub(crate) fn best_label(detection: &Event, labels: &[Event]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;

    for idx in candidate_labels(detection, labels) {
        let ratio = detection.coverage_of(&labels[idx]);
        if ratio <= 0.0 {
            continue;
        }
        match best {
            Some((_, best_ratio)) if best_ratio >= ratio => {}
            _ => best = Some((idx, ratio)),
        }
    }

    best
}

/// Lazy sequence of overlap percentages, one per detection
/// Finite; `rewind` (or a fresh `overlap_percentages` call) restarts it from the first detection
#[derive(Debug, Clone)]
pub struct OverlapPercentages<'a> {
    labels: &'a [Event],
    detections: &'a [Event],
    position: usize,
}

impl<'a> OverlapPercentages<'a> {
    fn new(labels: &'a [Event], detections: &'a [Event]) -> Self {
        OverlapPercentages {
            labels,
            detections,
            position: 0,
        }
    }

    /// Start again from the first detection
    pub fn rewind(&mut self) {
        self.position = 0;
    }

    /// Same walk, but keeping which label won for each detection
    pub fn records(self) -> impl Iterator<Item = OverlapRecord> + 'a {
        let labels = self.labels;
        self.detections
            .iter()
            .enumerate()
            .skip(self.position)
            .map(move |(detection_index, detection)| match best_label(detection, labels) {
                Some((label_index, ratio)) => OverlapRecord {
                    detection_index,
                    label_index: Some(label_index),
                    percent: ratio * 100.0,
                },
                None => OverlapRecord {
                    detection_index,
                    label_index: None,
                    percent: 0.0,
                },
            })
    }

    /// Arithmetic mean of the remaining percentages (0 when empty)
    pub fn mean(self) -> f64 {
        let (sum, count) = self.fold((0.0, 0usize), |(sum, count), p| (sum + p, count + 1));
        if count == 0 {
            0.0
        } else {
            sum / count as f64
        }
    }
}

impl Iterator for OverlapPercentages<'_> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let detection = self.detections.get(self.position)?;
        self.position += 1;
        let ratio = best_label(detection, self.labels).map_or(0.0, |(_, r)| r);
        Some(ratio * 100.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.detections.len() - self.position;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for OverlapPercentages<'_> {}

/// Overlap percentage of each detection with its best-matching labeled call
pub fn overlap_percentages<'a>(
    labels: &'a LabelSet,
    detections: &'a DetectionSet,
) -> OverlapPercentages<'a> {
    OverlapPercentages::new(labels.events(), detections.events())
}

/// Overlap percentages for the negative class
/// Takes label gaps and detector gaps, as produced by `non_events`
pub fn mean_overlaps<'a>(
    label_non_events: &'a LabelSet,
    detected_non_events: &'a DetectionSet,
) -> OverlapPercentages<'a> {
    OverlapPercentages::new(label_non_events.events(), detected_non_events.events())
}
