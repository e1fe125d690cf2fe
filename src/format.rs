//! Presentation formatting
//!
//! Duration and label formatting kept separate from session construction so
//! both sides stay independently testable. All functions here are pure.

use chrono::{DateTime, NaiveDate, Utc};

/// Label rendered in place of a duration while a session has no observed end
pub const ACTIVE_SESSION_LABEL: &str = "Active session";

/// Long-date day bucket label, e.g. "September 18, 2025".
///
/// Two instants share a label iff they fall on the same calendar date.
pub fn day_label(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Clock-time label for an instant, e.g. "09:05"
pub fn time_label(instant: DateTime<Utc>) -> String {
    instant.format("%H:%M").to_string()
}

/// Human duration between two instants: whole minutes (rounded), rendered as
/// "{h}h {m}m", "{h}h", or "{m}m". Negative spans clamp to "0m". Either bound
/// missing yields an empty string.
pub fn format_duration(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> String {
    let (Some(from), Some(to)) = (from, to) else {
        return String::new();
    };
    let ms = (to - from).num_milliseconds().max(0);
    let mins = (ms as f64 / 60_000.0).round() as i64;
    let h = mins / 60;
    let m = mins % 60;
    if h > 0 && m > 0 {
        format!("{}h {}m", h, m)
    } else if h > 0 {
        format!("{}h", h)
    } else {
        format!("{}m", m)
    }
}

/// Presentation label for a session: its duration when closed, the fixed
/// active-session label when open.
pub fn session_duration_label(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    is_open: bool,
) -> String {
    if is_open {
        ACTIVE_SESSION_LABEL.to_string()
    } else {
        format_duration(start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn test_day_label() {
        let date = NaiveDate::from_ymd_opt(2025, 9, 18).unwrap();
        assert_eq!(day_label(date), "September 18, 2025");

        let single_digit = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
        assert_eq!(day_label(single_digit), "January 3, 2025");
    }

    #[test]
    fn test_time_label() {
        assert_eq!(time_label(at("2025-09-18T09:05:00Z")), "09:05");
    }

    #[test]
    fn test_minutes_only() {
        let d = format_duration(Some(at("2025-09-18T09:00:00Z")), Some(at("2025-09-18T09:30:00Z")));
        assert_eq!(d, "30m");
    }

    #[test]
    fn test_whole_hours() {
        let d = format_duration(Some(at("2025-09-18T09:00:00Z")), Some(at("2025-09-18T11:00:00Z")));
        assert_eq!(d, "2h");
    }

    #[test]
    fn test_hours_and_minutes() {
        let d = format_duration(Some(at("2025-09-18T09:00:00Z")), Some(at("2025-09-18T10:05:00Z")));
        assert_eq!(d, "1h 5m");
    }

    #[test]
    fn test_zero_duration() {
        let t = at("2025-09-18T09:00:00Z");
        assert_eq!(format_duration(Some(t), Some(t)), "0m");
    }

    #[test]
    fn test_negative_span_clamps_to_zero() {
        let d = format_duration(Some(at("2025-09-18T10:00:00Z")), Some(at("2025-09-18T09:00:00Z")));
        assert_eq!(d, "0m");
    }

    #[test]
    fn test_sub_minute_rounds() {
        let d = format_duration(Some(at("2025-09-18T09:00:00Z")), Some(at("2025-09-18T09:00:30Z")));
        assert_eq!(d, "1m");

        let d = format_duration(Some(at("2025-09-18T09:00:00Z")), Some(at("2025-09-18T09:00:29Z")));
        assert_eq!(d, "0m");
    }

    #[test]
    fn test_missing_bound_yields_empty() {
        assert_eq!(format_duration(None, Some(at("2025-09-18T09:00:00Z"))), "");
        assert_eq!(format_duration(Some(at("2025-09-18T09:00:00Z")), None), "");
    }

    #[test]
    fn test_open_session_label() {
        let label = session_duration_label(Some(at("2025-09-18T09:00:00Z")), None, true);
        assert_eq!(label, ACTIVE_SESSION_LABEL);
    }

    #[test]
    fn test_closed_session_label_is_duration() {
        let label = session_duration_label(
            Some(at("2025-09-18T09:00:00Z")),
            Some(at("2025-09-18T09:30:00Z")),
            false,
        );
        assert_eq!(label, "30m");
    }
}
