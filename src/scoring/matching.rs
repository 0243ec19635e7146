// Event-level scoring
// Greedy best-overlap matching of detections to labeled calls, for calls and for the gaps between them

use serde::{Deserialize, Serialize};

use super::overlap::{best_label, candidate_labels};
use crate::events::{DetectionSet, Event, LabelSet};

/// Slack when comparing a coverage ratio against the required minimum
const RATIO_EPSILON: f64 = 1e-9;

/// One accepted detection-to-label pairing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match {
    pub detection_index: usize,
    pub label_index: usize,

    /// Fraction of the label covered by the detection (0, 1]
    pub ratio: f64,
}

/// Event-level confusion counts for calls and non-events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCounts {
    pub true_pos_events: usize,
    pub false_pos_events: usize,
    pub false_neg_events: usize,

    /// Detections touching any call at all, strict true positives included
    pub true_pos_any_overlap_events: usize,

    pub num_true_pos_detected_non_events: usize,
    pub num_false_pos_detected_non_events: usize,
    pub num_false_neg_detected_non_events: usize,
    pub true_pos_any_overlap_non_event: usize,
}

/// Counts for one side (calls or gaps)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ClassCounts {
    true_pos: usize,
    false_pos: usize,
    false_neg: usize,
    any_overlap: usize,
}

/// Pair detections with labels, best overlap first
///
/// Every overlapping (detection, label) pair is ranked by the fraction of the
/// label it covers. Ties go to the earlier label, then the earlier detection.
/// A pair is taken when neither side has been matched yet.
pub fn greedy_match(labels: &[Event], detections: &[Event]) -> Vec<Match> {
    let mut candidates: Vec<Match> = Vec::new();

    for (detection_index, detection) in detections.iter().enumerate() {
        for label_index in candidate_labels(detection, labels) {
            let ratio = detection.coverage_of(&labels[label_index]);
            if ratio > 0.0 {
                candidates.push(Match {
                    detection_index,
                    label_index,
                    ratio,
                });
            }
        }
    }

    candidates.sort_by(|a, b| {
        b.ratio
            .total_cmp(&a.ratio)
            .then(a.label_index.cmp(&b.label_index))
            .then(a.detection_index.cmp(&b.detection_index))
    });

    let mut label_taken = vec![false; labels.len()];
    let mut detection_taken = vec![false; detections.len()];
    let mut matches = Vec::new();

    for candidate in candidates {
        if label_taken[candidate.label_index] || detection_taken[candidate.detection_index] {
            continue;
        }
        label_taken[candidate.label_index] = true;
        detection_taken[candidate.detection_index] = true;
        matches.push(candidate);
    }

    matches
}

fn count_class(labels: &[Event], detections: &[Event], min_overlap_ratio: f64) -> ClassCounts {
    let true_pos = greedy_match(labels, detections)
        .iter()
        .filter(|m| m.ratio + RATIO_EPSILON >= min_overlap_ratio)
        .count();

    let any_overlap = detections
        .iter()
        .filter(|d| best_label(d, labels).is_some())
        .count();

    ClassCounts {
        true_pos,
        false_pos: detections.len() - any_overlap,
        false_neg: labels.len() - true_pos,
        any_overlap,
    }
}

/// Score calls and non-events, taking non-events inside `[0, span_end_ms)`
pub fn score_events_within(
    labels: &LabelSet,
    detections: &DetectionSet,
    min_overlap_ratio: f64,
    span_end_ms: f64,
) -> EventCounts {
    let calls = count_class(labels.events(), detections.events(), min_overlap_ratio);

    let label_gaps = labels.non_events(span_end_ms);
    let detected_gaps = detections.non_events(span_end_ms);
    let gaps = count_class(label_gaps.events(), detected_gaps.events(), min_overlap_ratio);

    log::debug!(
        "Event scoring over {:.1} ms: {} labels, {} detections, {} label gaps, {} detector gaps",
        span_end_ms,
        labels.len(),
        detections.len(),
        label_gaps.len(),
        detected_gaps.len()
    );

    EventCounts {
        true_pos_events: calls.true_pos,
        false_pos_events: calls.false_pos,
        false_neg_events: calls.false_neg,
        true_pos_any_overlap_events: calls.any_overlap,
        num_true_pos_detected_non_events: gaps.true_pos,
        num_false_pos_detected_non_events: gaps.false_pos,
        num_false_neg_detected_non_events: gaps.false_neg,
        true_pos_any_overlap_non_event: gaps.any_overlap,
    }
}

/// Score calls and non-events
/// Non-events span from 0 to the latest end time in either set
pub fn score_events(
    labels: &LabelSet,
    detections: &DetectionSet,
    min_overlap_ratio: f64,
) -> EventCounts {
    let span_end_ms = labels.max_end_ms().max(detections.max_end_ms());
    score_events_within(labels, detections, min_overlap_ratio, span_end_ms)
}
