//! Event normalization
//!
//! First pipeline stage: resolves heterogeneous timestamp representations to
//! canonical instants, drops events that do not resolve, and sorts the rest
//! ascending so the session builder sees login → activity → logout order.

use crate::types::{InteractionEvent, NormalizedEvent};

/// Normalize raw events into time-ordered events with canonical instants.
///
/// Events whose timestamp does not resolve to a real instant are silently
/// dropped; that is a deliberate lossy filter, not an error. The sort is
/// stable, so events sharing an instant keep their input order.
pub fn normalize_events(events: &[InteractionEvent]) -> Vec<NormalizedEvent> {
    let mut normalized: Vec<NormalizedEvent> = events
        .iter()
        .filter_map(|event| {
            let instant = event.timestamp.to_instant()?;
            Some(NormalizedEvent::new(
                event.id.clone(),
                event.kind.clone(),
                event.details.clone(),
                instant,
            ))
        })
        .collect();

    normalized.sort_by_key(|e| e.instant);
    normalized
}
