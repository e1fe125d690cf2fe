//! Pipeline orchestration
//!
//! Public entry points for the full reconstruction pipeline:
//! normalize → range filter → session build → day grouping.
//!
//! The pipeline is synchronous, single-threaded, and free of side effects;
//! re-running it on the same input reproduces the same output. The fetch
//! that supplies events (and any last-write-wins handling of overlapping
//! fetches) belongs to the caller.

use crate::adapter::EventAdapter;
use crate::builder::build_sessions;
use crate::error::EngineError;
use crate::filter::{filter_events, DateRange};
use crate::grouper::group_by_day;
use crate::normalizer::normalize_events;
use crate::types::{DaySection, InteractionEvent};

/// Reconstruct the session timeline for one student's events.
///
/// Events may arrive in any order with heterogeneous timestamps. With an
/// unbounded range only the most recent calendar day is reconstructed.
pub fn reconstruct_timeline(events: &[InteractionEvent], range: &DateRange) -> Vec<DaySection> {
    let normalized = normalize_events(events);
    let in_range = filter_events(normalized, range);
    let sessions = build_sessions(&in_range);
    group_by_day(sessions)
}

/// JSON-in, JSON-out convenience: parse a JSON array of raw events, run the
/// pipeline, and serialize the day sections.
pub fn timeline_from_json(events_json: &str, range: &DateRange) -> Result<String, EngineError> {
    let events = EventAdapter::parse_array(events_json)?;
    let sections = reconstruct_timeline(&events, range);
    Ok(serde_json::to_string(&sections)?)
}
