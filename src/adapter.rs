//! Adapter for raw interaction event payloads
//!
//! Parses the event-fetch collaborator's JSON (array or newline-delimited)
//! into `InteractionEvent`s and provides a batch validation report for
//! diagnosing bad feeds without running the pipeline.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::EngineError;
use crate::types::{EventKind, InteractionEvent};

/// Adapter for decoding raw event payloads
pub struct EventAdapter;

impl EventAdapter {
    /// Parse a JSON array of interaction events
    pub fn parse_array(json: &str) -> Result<Vec<InteractionEvent>, EngineError> {
        let events: Vec<InteractionEvent> = serde_json::from_str(json)?;
        Ok(events)
    }

    /// Parse NDJSON (one event per line, blank lines skipped)
    pub fn parse_ndjson(ndjson: &str) -> Result<Vec<InteractionEvent>, EngineError> {
        let mut events = Vec::new();
        for (line_num, line) in ndjson.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str::<InteractionEvent>(trimmed) {
                Ok(event) => events.push(event),
                Err(e) => {
                    return Err(EngineError::ParseError(format!(
                        "Failed to parse line {}: {}",
                        line_num + 1,
                        e
                    )));
                }
            }
        }
        Ok(events)
    }

    /// Report per-event problems: timestamps that do not resolve to a real
    /// instant (the normalizer would drop these) and event kinds outside the
    /// known contract (the builder treats these as plain activity).
    pub fn validate_events(events: &[InteractionEvent]) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        for (index, event) in events.iter().enumerate() {
            if event.timestamp.to_instant().is_none() {
                issues.push(ValidationIssue {
                    index,
                    event_id: event.id.clone(),
                    issue: EventIssue::InvalidTimestamp,
                });
            }
            if let EventKind::Other(name) = &event.kind {
                issues.push(ValidationIssue {
                    index,
                    event_id: event.id.clone(),
                    issue: EventIssue::UnknownKind(name.clone()),
                });
            }
        }
        issues
    }

    /// Number of distinct events carrying at least one issue. An event can
    /// be flagged for both a bad timestamp and an unknown kind.
    pub fn flagged_event_count(issues: &[ValidationIssue]) -> usize {
        issues.iter().map(|i| i.index).collect::<HashSet<_>>().len()
    }
}

/// One problem found in a raw event batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub index: usize,
    pub event_id: String,
    pub issue: EventIssue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum EventIssue {
    #[error("timestamp does not resolve to a valid instant")]
    InvalidTimestamp,
    #[error("unknown event type: {0}")]
    UnknownKind(String),
}
