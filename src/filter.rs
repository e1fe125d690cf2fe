//! Date range filtering
//!
//! Second pipeline stage: applies an optional inclusive calendar-date range
//! to the normalized event sequence. With no range at all, only the most
//! recent calendar day's events pass; the engine is a recent-activity
//! glance, and full history requires an explicit range.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::types::NormalizedEvent;

/// Optional inclusive calendar-date range supplied by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        DateRange { from, to }
    }

    /// Parse user-supplied `YYYY-MM-DD` bounds
    pub fn parse(from: Option<&str>, to: Option<&str>) -> Result<Self, EngineError> {
        Ok(DateRange {
            from: from.map(parse_date).transpose()?,
            to: to.map(parse_date).transpose()?,
        })
    }

    /// No bounds given; the latest-day default applies
    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, EngineError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| EngineError::DateParseError(s.to_string()))
}

/// Local midnight of the given date
fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// 23:59:59.999 of the given date, so the `to` bound includes the whole day
fn day_end(date: NaiveDate) -> DateTime<Utc> {
    let end = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    date.and_time(end).and_utc()
}

/// Apply the range to an ascending-sorted event sequence.
///
/// With either bound present the filter is inclusive on both ends. With
/// neither bound, only events sharing the calendar day of the last (most
/// recent) event pass; an empty input yields an empty output with no error.
pub fn filter_events(events: Vec<NormalizedEvent>, range: &DateRange) -> Vec<NormalizedEvent> {
    if range.is_unbounded() {
        let Some(last) = events.last() else {
            return Vec::new();
        };
        let latest_day = last.day();
        return events.into_iter().filter(|e| e.day() == latest_day).collect();
    }

    let from = range.from.map(day_start);
    let to = range.to.map(day_end);

    events
        .into_iter()
        .filter(|e| {
            if let Some(from) = from {
                if e.instant < from {
                    return false;
                }
            }
            if let Some(to) = to {
                if e.instant > to {
                    return false;
                }
            }
            true
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EventKind;

    fn event(id: &str, ts: &str) -> NormalizedEvent {
        NormalizedEvent::new(id, EventKind::QuestionAsked, "", ts.parse().unwrap())
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn ids(events: &[NormalizedEvent]) -> Vec<&str> {
        events.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_parse_range() {
        let range = DateRange::parse(Some("2025-09-17"), Some("2025-09-18")).unwrap();
        assert_eq!(range.from, Some(date("2025-09-17")));
        assert_eq!(range.to, Some(date("2025-09-18")));
    }

    #[test]
    fn test_parse_rejects_bad_date() {
        let result = DateRange::parse(Some("09/17/2025"), None);
        assert!(matches!(result, Err(EngineError::DateParseError(_))));
    }

    #[test]
    fn test_inclusive_bounds() {
        let events = vec![
            event("before", "2025-09-16T23:59:59Z"),
            event("at-from-midnight", "2025-09-17T00:00:00Z"),
            event("inside", "2025-09-17T12:00:00Z"),
            event("end-of-to-day", "2025-09-18T23:59:59Z"),
            event("after", "2025-09-19T00:00:00Z"),
        ];
        let range = DateRange::parse(Some("2025-09-17"), Some("2025-09-18")).unwrap();

        let filtered = filter_events(events, &range);
        assert_eq!(ids(&filtered), vec!["at-from-midnight", "inside", "end-of-to-day"]);
    }

    #[test]
    fn test_from_only() {
        let events = vec![
            event("old", "2025-09-10T10:00:00Z"),
            event("new", "2025-09-18T10:00:00Z"),
        ];
        let range = DateRange::parse(Some("2025-09-15"), None).unwrap();

        let filtered = filter_events(events, &range);
        assert_eq!(ids(&filtered), vec!["new"]);
    }

    #[test]
    fn test_to_only() {
        let events = vec![
            event("old", "2025-09-10T10:00:00Z"),
            event("new", "2025-09-18T10:00:00Z"),
        ];
        let range = DateRange::parse(None, Some("2025-09-15")).unwrap();

        let filtered = filter_events(events, &range);
        assert_eq!(ids(&filtered), vec!["old"]);
    }

    #[test]
    fn test_default_keeps_latest_day_only() {
        let events = vec![
            event("day1-a", "2025-09-17T09:00:00Z"),
            event("day1-b", "2025-09-17T18:00:00Z"),
            event("day2-a", "2025-09-18T08:00:00Z"),
            event("day2-b", "2025-09-18T11:00:00Z"),
        ];

        let filtered = filter_events(events, &DateRange::default());
        assert_eq!(ids(&filtered), vec!["day2-a", "day2-b"]);
    }

    #[test]
    fn test_default_on_empty_input() {
        let filtered = filter_events(Vec::new(), &DateRange::default());
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_range_can_filter_everything() {
        let events = vec![event("a", "2025-09-18T10:00:00Z")];
        let range = DateRange::parse(Some("2025-01-01"), Some("2025-01-31")).unwrap();

        let filtered = filter_events(events, &range);
        assert!(filtered.is_empty());
    }
}
