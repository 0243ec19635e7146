// Interval types for labeled and detected rumbles
// Defines the half-open Event interval and the two ordered sets scored against each other

use serde::{Deserialize, Serialize};

use crate::error::ScoringError;

/// A half-open time interval `[start_ms, end_ms)`
/// Used for both ground-truth calls and detector output
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawEvent")]
pub struct Event {
    /// Start of the interval in milliseconds from the start of the recording
    start_ms: f64,

    /// End of the interval (exclusive) in milliseconds
    end_ms: f64,
}

impl Event {
    /// Create a validated event
    /// Rejects non-finite or negative times and empty/reversed intervals
    pub fn new(start_ms: f64, end_ms: f64) -> Result<Self, ScoringError> {
        if !start_ms.is_finite() || !end_ms.is_finite() {
            return Err(ScoringError::NonFiniteTime { start_ms, end_ms });
        }
        if start_ms < 0.0 || end_ms < 0.0 {
            return Err(ScoringError::NegativeTime { start_ms, end_ms });
        }
        if end_ms <= start_ms {
            return Err(ScoringError::InvalidInterval { start_ms, end_ms });
        }

        Ok(Event { start_ms, end_ms })
    }

    pub fn start_ms(&self) -> f64 {
        self.start_ms
    }

    pub fn end_ms(&self) -> f64 {
        self.end_ms
    }

    pub fn duration_ms(&self) -> f64 {
        self.end_ms - self.start_ms
    }

    /// Length of the intersection with another interval (0 if disjoint)
    pub fn overlap_ms(&self, other: &Event) -> f64 {
        let start = self.start_ms.max(other.start_ms);
        let end = self.end_ms.min(other.end_ms);
        (end - start).max(0.0)
    }

    /// Fraction of `label` covered by this interval, in [0, 1]
    pub fn coverage_of(&self, label: &Event) -> f64 {
        (self.overlap_ms(label) / label.duration_ms()).clamp(0.0, 1.0)
    }
}

/// Ground-truth calls: sorted by start time, pairwise non-overlapping
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Event>", into = "Vec<Event>")]
pub struct LabelSet {
    events: Vec<Event>,
}

impl LabelSet {
    /// Build a label set, sorting by start time
    /// Touching intervals are allowed; any real overlap is rejected
    pub fn new(mut events: Vec<Event>) -> Result<Self, ScoringError> {
        events.sort_by(|a, b| a.start_ms.total_cmp(&b.start_ms));

        for pair in events.windows(2) {
            if pair[1].start_ms < pair[0].end_ms {
                return Err(ScoringError::OverlappingLabels {
                    first_start_ms: pair[0].start_ms,
                    first_end_ms: pair[0].end_ms,
                    second_start_ms: pair[1].start_ms,
                    second_end_ms: pair[1].end_ms,
                });
            }
        }

        Ok(LabelSet { events })
    }

    /// Convenience constructor from `(start_ms, end_ms)` pairs
    pub fn from_intervals(intervals: &[(f64, f64)]) -> Result<Self, ScoringError> {
        let events = intervals
            .iter()
            .map(|&(start, end)| Event::new(start, end))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Latest end time, or 0 for an empty set
    pub fn max_end_ms(&self) -> f64 {
        max_end(&self.events)
    }

    /// Gaps between calls inside `[0, span_end_ms)`
    /// The result is itself ordered and non-overlapping
    pub fn non_events(&self, span_end_ms: f64) -> LabelSet {
        LabelSet {
            events: complement(&self.events, span_end_ms),
        }
    }
}

/// Detector output: sorted by start time, overlaps allowed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Event>", into = "Vec<Event>")]
pub struct DetectionSet {
    events: Vec<Event>,
}

impl DetectionSet {
    pub fn new(mut events: Vec<Event>) -> Self {
        events.sort_by(|a, b| a.start_ms.total_cmp(&b.start_ms));
        DetectionSet { events }
    }

    /// Convenience constructor from `(start_ms, end_ms)` pairs
    pub fn from_intervals(intervals: &[(f64, f64)]) -> Result<Self, ScoringError> {
        let events = intervals
            .iter()
            .map(|&(start, end)| Event::new(start, end))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(events))
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn max_end_ms(&self) -> f64 {
        max_end(&self.events)
    }

    /// Stretches of `[0, span_end_ms)` where the detector reported nothing
    /// Overlapping detections are merged before taking the complement
    pub fn non_events(&self, span_end_ms: f64) -> DetectionSet {
        DetectionSet {
            events: complement(&self.events, span_end_ms),
        }
    }
}

/// Unvalidated wire form of an `Event`
#[derive(Deserialize)]
struct RawEvent {
    start_ms: f64,
    end_ms: f64,
}

impl TryFrom<RawEvent> for Event {
    type Error = ScoringError;

    fn try_from(raw: RawEvent) -> Result<Self, Self::Error> {
        Event::new(raw.start_ms, raw.end_ms)
    }
}

impl TryFrom<Vec<Event>> for LabelSet {
    type Error = ScoringError;

    fn try_from(events: Vec<Event>) -> Result<Self, Self::Error> {
        LabelSet::new(events)
    }
}

impl From<LabelSet> for Vec<Event> {
    fn from(labels: LabelSet) -> Self {
        labels.events
    }
}

impl From<Vec<Event>> for DetectionSet {
    fn from(events: Vec<Event>) -> Self {
        DetectionSet::new(events)
    }
}

impl From<DetectionSet> for Vec<Event> {
    fn from(detections: DetectionSet) -> Self {
        detections.events
    }
}

fn max_end(events: &[Event]) -> f64 {
    events.iter().map(|e| e.end_ms).fold(0.0, f64::max)
}

/// Complement of start-sorted intervals within `[0, span_end_ms)`
/// Zero-length gaps are dropped
fn complement(events: &[Event], span_end_ms: f64) -> Vec<Event> {
    let mut gaps = Vec::new();
    let mut cursor = 0.0_f64;

    for event in events {
        if cursor >= span_end_ms {
            break;
        }
        let gap_end = event.start_ms.min(span_end_ms);
        if gap_end > cursor {
            gaps.push(Event {
                start_ms: cursor,
                end_ms: gap_end,
            });
        }
        cursor = cursor.max(event.end_ms);
    }

    if span_end_ms > cursor {
        gaps.push(Event {
            start_ms: cursor,
            end_ms: span_end_ms,
        });
    }

    gaps
}
