//! Core types for the interaction timeline pipeline
//!
//! This module defines the data that flows through each stage of the
//! pipeline: raw interaction events, normalized events with canonical
//! instants, reconstructed sessions, and day sections.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::format::{day_label, session_duration_label, time_label};

/// Interaction event kind.
///
/// The four known kinds form the upstream contract; anything else the
/// collector hands us is preserved verbatim as `Other` and treated as an
/// ordinary activity event by the session builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Login,
    Logout,
    ApplicationSubmitted,
    QuestionAsked,
    #[serde(untagged)]
    Other(String),
}

impl EventKind {
    pub fn as_str(&self) -> &str {
        match self {
            EventKind::Login => "login",
            EventKind::Logout => "logout",
            EventKind::ApplicationSubmitted => "application_submitted",
            EventKind::QuestionAsked => "question_asked",
            EventKind::Other(name) => name.as_str(),
        }
    }

    /// Display label for the rendering collaborator
    pub fn label(&self) -> &str {
        match self {
            EventKind::Login => "Login",
            EventKind::Logout => "Logout",
            EventKind::ApplicationSubmitted => "Application Submitted",
            EventKind::QuestionAsked => "AI Question",
            EventKind::Other(name) => name.as_str(),
        }
    }

    /// Activity events land in a session's `items`; logins and logouts
    /// bound sessions instead.
    pub fn is_activity(&self) -> bool {
        !matches!(self, EventKind::Login | EventKind::Logout)
    }
}

/// Timestamp as it arrives from the event store.
///
/// Collectors are inconsistent about this field: some write ISO-8601
/// strings, some write a document-store timestamp object, some write raw
/// epoch milliseconds. The union is closed so every accepted shape has an
/// explicit conversion; `to_instant` returning `None` is the invalid-instant
/// sentinel and such events are dropped by the normalizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    /// ISO-8601 / RFC-3339 string; bare dates are taken at midnight UTC
    Iso(String),
    /// Document-store timestamp object (`seconds` + `nanoseconds`)
    Epoch {
        #[serde(alias = "_seconds")]
        seconds: i64,
        #[serde(default, alias = "_nanoseconds")]
        nanoseconds: u32,
    },
    /// Epoch milliseconds
    Millis(i64),
}

impl RawTimestamp {
    /// Resolve to a canonical instant, or `None` when the value does not
    /// name a real point in time.
    pub fn to_instant(&self) -> Option<DateTime<Utc>> {
        match self {
            RawTimestamp::Iso(s) => parse_iso_instant(s),
            RawTimestamp::Epoch {
                seconds,
                nanoseconds,
            } => DateTime::from_timestamp(*seconds, *nanoseconds),
            RawTimestamp::Millis(ms) => DateTime::from_timestamp_millis(*ms),
        }
    }
}

fn parse_iso_instant(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    // Offset-less datetimes and bare dates are treated as UTC
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_time(chrono::NaiveTime::MIN).and_utc());
    }
    None
}

/// A raw interaction event for one student, as fetched from the event store.
///
/// No ordering or completeness is assumed; the normalizer sorts and the
/// builder absorbs missing logins/logouts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionEvent {
    /// Opaque identifier, unique within a student's event set
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    /// Free-text description, display-only
    #[serde(default)]
    pub details: String,
    pub timestamp: RawTimestamp,
}

impl InteractionEvent {
    /// Create a new event with a generated identifier
    pub fn new(kind: EventKind, details: impl Into<String>, timestamp: RawTimestamp) -> Self {
        InteractionEvent {
            id: Uuid::new_v4().to_string(),
            kind,
            details: details.into(),
            timestamp,
        }
    }
}

/// An event whose timestamp has been resolved to a canonical instant.
///
/// Only normalized events reach the range filter and session builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub details: String,
    pub instant: DateTime<Utc>,
    /// Display label for the kind, e.g. "AI Question"
    pub label: String,
    /// Clock-time label for the instant, e.g. "09:05"
    pub time_label: String,
}

impl NormalizedEvent {
    /// Build a normalized event, deriving its display labels
    pub fn new(
        id: impl Into<String>,
        kind: EventKind,
        details: impl Into<String>,
        instant: DateTime<Utc>,
    ) -> Self {
        let label = kind.label().to_string();
        NormalizedEvent {
            id: id.into(),
            kind,
            details: details.into(),
            instant,
            label,
            time_label: time_label(instant),
        }
    }

    /// Calendar day this event falls on
    pub fn day(&self) -> NaiveDate {
        self.instant.date_naive()
    }
}

/// A reconstructed session: an explicit or inferred login, the activity in
/// between, and an explicit or inferred end.
///
/// Sessions exist only within one pipeline invocation; they are never
/// persisted and rebuilding from the same events reproduces them exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Triggering login, absent when the start was inferred from activity
    pub start: Option<NormalizedEvent>,
    /// Activity events between start and end, in chronological order
    pub items: Vec<NormalizedEvent>,
    /// Terminating logout, absent when the session never closed explicitly
    pub end: Option<NormalizedEvent>,
    pub start_instant: Option<DateTime<Utc>>,
    pub end_instant: Option<DateTime<Utc>>,
    /// Calendar day bucket, derived from the start instant
    pub day: NaiveDate,
    /// Long-date label for the day bucket, e.g. "September 18, 2025"
    pub date_key: String,
    /// True when no logout was observed before the session was closed
    pub is_open: bool,
    /// Presentation label: a duration for closed sessions, a fixed
    /// active-session label otherwise
    pub duration_label: String,
}

impl Session {
    /// Session produced by a logout with no preceding login on its day
    pub fn orphan(logout: NormalizedEvent) -> Self {
        let day = logout.day();
        let end_instant = logout.instant;
        Session {
            start: None,
            items: Vec::new(),
            end: Some(logout),
            start_instant: None,
            end_instant: Some(end_instant),
            day,
            date_key: day_label(day),
            is_open: false,
            duration_label: session_duration_label(None, Some(end_instant), false),
        }
    }

    /// Ordering key for the emitted session list. Orphan sessions have no
    /// start instant and sort by their end instant instead.
    pub fn sort_instant(&self) -> Option<DateTime<Utc>> {
        self.start_instant.or(self.end_instant)
    }
}

/// One calendar day of reconstructed sessions, ready for direct display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySection {
    pub date: NaiveDate,
    /// Long-date heading, e.g. "September 18, 2025"
    pub date_key: String,
    pub sessions: Vec<Session>,
}
