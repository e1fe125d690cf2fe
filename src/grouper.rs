//! Day grouping
//!
//! Final pipeline stage: partitions the reconstructed sessions into calendar
//! day buckets, ordered ascending by date, ready for direct display.

use std::collections::BTreeMap;

use crate::format::day_label;
use crate::types::{DaySection, Session};

/// Group sessions into day sections, ascending by calendar date.
///
/// Session order within a day is preserved from the builder's output.
pub fn group_by_day(sessions: Vec<Session>) -> Vec<DaySection> {
    let mut by_day: BTreeMap<chrono::NaiveDate, Vec<Session>> = BTreeMap::new();
    for session in sessions {
        by_day.entry(session.day).or_default().push(session);
    }

    by_day
        .into_iter()
        .map(|(date, sessions)| DaySection {
            date,
            date_key: day_label(date),
            sessions,
        })
        .collect()
}
