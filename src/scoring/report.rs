// Performance report
// Everything one scoring pass produces, plus a flat metric-name view

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::matching::EventCounts;
use super::rates::Rates;
use super::samples::SampleCounts;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    /// Coverage ratio a match needed to count as a true positive
    pub min_required_overlap: f64,

    pub events: EventCounts,
    pub samples: SampleCounts,

    pub event_rates: Rates,
    pub non_event_rates: Rates,
    pub sample_rates: Rates,

    /// Mean overlap percentage over all detections
    pub mean_overlaps_events: f64,

    /// Mean overlap percentage over all detector gaps
    pub mean_overlaps_non_events: f64,
}

impl PerformanceReport {
    /// Flatten to metric name -> value
    pub fn metrics(&self) -> BTreeMap<&'static str, f64> {
        let e = &self.events;
        let s = &self.samples;

        BTreeMap::from([
            ("min_required_overlap", self.min_required_overlap),
            ("recall_events", self.event_rates.recall),
            ("precision_events", self.event_rates.precision),
            ("f1_score_events", self.event_rates.f1),
            ("recall_non_events", self.non_event_rates.recall),
            ("precision_non_events", self.non_event_rates.precision),
            ("f1_score_non_events", self.non_event_rates.f1),
            ("recall_samples", self.sample_rates.recall),
            ("precision_samples", self.sample_rates.precision),
            ("f1_score_samples", self.sample_rates.f1),
            ("true_pos_events", e.true_pos_events as f64),
            ("false_pos_events", e.false_pos_events as f64),
            ("false_neg_events", e.false_neg_events as f64),
            ("true_pos_any_overlap_events", e.true_pos_any_overlap_events as f64),
            (
                "num_true_pos_detected_non_events",
                e.num_true_pos_detected_non_events as f64,
            ),
            (
                "num_false_pos_detected_non_events",
                e.num_false_pos_detected_non_events as f64,
            ),
            (
                "num_false_neg_detected_non_events",
                e.num_false_neg_detected_non_events as f64,
            ),
            (
                "true_pos_any_overlap_non_event",
                e.true_pos_any_overlap_non_event as f64,
            ),
            ("true_pos_samples", s.true_pos_samples as f64),
            ("false_pos_samples", s.false_pos_samples as f64),
            ("true_neg_samples", s.true_neg_samples as f64),
            ("false_neg_samples", s.false_neg_samples as f64),
            ("mean_overlaps_events", self.mean_overlaps_events),
            ("mean_overlaps_non_events", self.mean_overlaps_non_events),
        ])
    }
}
