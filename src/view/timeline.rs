//! Event list grouped by half, marked against the cursor

use serde::Serialize;

use crate::model::MatchEvent;
use crate::util::time::{HALF_TIME_MINUTE, MATCH_DURATION_MINUTES};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineEntry {
    pub event: MatchEvent,
    /// Whole minute shown next to the event
    pub minute: u32,
    pub happened: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineSection {
    pub label: &'static str,
    pub start: f64,
    pub end: f64,
    pub entries: Vec<TimelineEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timeline {
    pub sections: Vec<TimelineSection>,
    /// Events at or before the cursor
    pub happened_count: usize,
}

/// Build the timeline at `cursor`.
///
/// Both bounds are inclusive, so an event at exactly minute 45 is listed
/// under both halves.
pub fn build_timeline(events: &[MatchEvent], cursor: f64) -> Timeline {
    let mut sorted: Vec<&MatchEvent> = events.iter().collect();
    sorted.sort_by(|a, b| a.time.total_cmp(&b.time));

    let sections = [
        ("1st Half", 0.0, HALF_TIME_MINUTE),
        ("2nd Half", HALF_TIME_MINUTE, MATCH_DURATION_MINUTES),
    ]
    .into_iter()
    .map(|(label, start, end)| TimelineSection {
        label,
        start,
        end,
        entries: sorted
            .iter()
            .filter(|e| e.time >= start && e.time <= end)
            .map(|e| TimelineEntry {
                event: (*e).clone(),
                minute: e.time.floor() as u32,
                happened: cursor >= e.time,
            })
            .collect(),
    })
    .collect();

    Timeline {
        sections,
        happened_count: sorted.iter().filter(|e| e.time <= cursor).count(),
    }
}
