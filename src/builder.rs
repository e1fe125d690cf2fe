//! Session reconstruction state machine
//!
//! Third pipeline stage: folds the filtered, time-ordered event sequence
//! into sessions. The fold is expressed as an explicit state type with pure
//! transition functions so each rule is unit-testable in isolation:
//!
//! - `roll_day` closes an open session when the calendar day changes, so a
//!   session never spans two days.
//! - `apply` consumes one event: a login starts a session (closing any open
//!   one), a logout closes the session or emits an orphan, and activity
//!   either extends the open session or infers a new one.
//! - `flush` emits whatever is still open at end of stream.
//!
//! The builder never fails: out-of-order logins, missing logouts, and
//! logouts with no login are all absorbed by these rules.

use chrono::{DateTime, NaiveDate, Utc};

use crate::format::{day_label, session_duration_label};
use crate::types::{EventKind, NormalizedEvent, Session};

/// Builder state between events
#[derive(Debug, Clone, PartialEq)]
pub enum BuilderState {
    /// No session currently open
    Idle,
    /// A session accumulating events
    Open(OpenSession),
}

/// A session still accumulating events. Always has a start instant: either
/// an explicit login or the first activity it was inferred from.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenSession {
    pub start: Option<NormalizedEvent>,
    pub items: Vec<NormalizedEvent>,
    pub start_instant: DateTime<Utc>,
    pub day: NaiveDate,
}

impl OpenSession {
    /// Session opened by an explicit login
    fn started_by(login: NormalizedEvent) -> Self {
        OpenSession {
            day: login.day(),
            start_instant: login.instant,
            start: Some(login),
            items: Vec::new(),
        }
    }

    /// Session start inferred from an activity event with no open session
    fn inferred_from(activity: NormalizedEvent) -> Self {
        OpenSession {
            day: activity.day(),
            start_instant: activity.instant,
            start: None,
            items: vec![activity],
        }
    }

    /// Close into a finished session. Without an explicit logout the end
    /// instant falls back to the last item, then to the start instant, and
    /// the session stays marked open.
    fn close_with(self, end: Option<NormalizedEvent>) -> Session {
        let end_instant = end
            .as_ref()
            .map(|e| e.instant)
            .or_else(|| self.items.last().map(|e| e.instant))
            .unwrap_or(self.start_instant);
        let is_open = end.is_none();

        Session {
            start: self.start,
            items: self.items,
            end,
            start_instant: Some(self.start_instant),
            end_instant: Some(end_instant),
            day: self.day,
            date_key: day_label(self.day),
            is_open,
            duration_label: session_duration_label(
                Some(self.start_instant),
                Some(end_instant),
                is_open,
            ),
        }
    }
}

/// Close the open session if the next event falls on a different calendar
/// day. Applied before `apply` for every event.
pub fn roll_day(state: BuilderState, day: NaiveDate) -> (BuilderState, Option<Session>) {
    match state {
        BuilderState::Open(open) if open.day != day => {
            (BuilderState::Idle, Some(open.close_with(None)))
        }
        other => (other, None),
    }
}

/// Consume one event, emitting at most one completed session.
pub fn apply(state: BuilderState, event: &NormalizedEvent) -> (BuilderState, Option<Session>) {
    match (state, &event.kind) {
        // A login always opens a fresh session, closing any session in
        // progress on the same day.
        (state, EventKind::Login) => {
            let emitted = match state {
                BuilderState::Open(open) => Some(open.close_with(None)),
                BuilderState::Idle => None,
            };
            (
                BuilderState::Open(OpenSession::started_by(event.clone())),
                emitted,
            )
        }

        // Logout with no open session: emit an orphan, stay idle.
        (BuilderState::Idle, EventKind::Logout) => {
            (BuilderState::Idle, Some(Session::orphan(event.clone())))
        }

        // Logout closes the open session explicitly.
        (BuilderState::Open(open), EventKind::Logout) => {
            (BuilderState::Idle, Some(open.close_with(Some(event.clone()))))
        }

        // Activity with no open session infers a session start.
        (BuilderState::Idle, _) => (
            BuilderState::Open(OpenSession::inferred_from(event.clone())),
            None,
        ),

        // Activity extends the open session, order preserved.
        (BuilderState::Open(mut open), _) => {
            open.items.push(event.clone());
            (BuilderState::Open(open), None)
        }
    }
}

/// Emit the session still open at end of stream, if any.
pub fn flush(state: BuilderState) -> Option<Session> {
    match state {
        BuilderState::Idle => None,
        BuilderState::Open(open) => Some(open.close_with(None)),
    }
}

/// Fold an ascending-sorted event sequence into sessions.
///
/// The emitted list is stable-sorted by start instant as a safety net;
/// orphan sessions, which have none, sort by their end instant.
pub fn build_sessions(events: &[NormalizedEvent]) -> Vec<Session> {
    let mut sessions = Vec::new();
    let mut state = BuilderState::Idle;

    for event in events {
        let (rolled, emitted) = roll_day(state, event.day());
        sessions.extend(emitted);

        let (next, emitted) = apply(rolled, event);
        sessions.extend(emitted);
        state = next;
    }

    sessions.extend(flush(state));
    sessions.sort_by_key(Session::sort_instant);
    sessions
}
