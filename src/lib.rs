//! Interaction Timeline - session reconstruction for student interaction events
//!
//! Takes the unordered stream of raw behavioral events recorded for one
//! prospective student (logins, logouts, application submissions,
//! AI-assistant questions) and reconstructs a bounded, human-meaningful
//! timeline through a deterministic pipeline: timestamp normalization →
//! date-range filtering → session building → day grouping.
//!
//! The engine is a pure transform: no I/O, no clock reads, no shared state.
//! Fetching events and rendering the resulting day sections belong to the
//! surrounding application.

pub mod adapter;
pub mod builder;
pub mod error;
pub mod filter;
pub mod format;
pub mod grouper;
pub mod normalizer;
pub mod pipeline;
pub mod types;

pub use error::EngineError;
pub use filter::DateRange;
pub use pipeline::{reconstruct_timeline, timeline_from_json};
pub use types::{DaySection, EventKind, InteractionEvent, NormalizedEvent, RawTimestamp, Session};

/// Engine version embedded in CLI output
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
