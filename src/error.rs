//! Error types for the interaction timeline engine

use thiserror::Error;

/// Errors surfaced at the engine's parsing boundary.
///
/// The pipeline core itself is total: malformed timestamps are dropped by
/// the normalizer and odd event sequences are absorbed by the session
/// builder, so only input decoding and filter-date parsing can fail.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to parse events payload: {0}")]
    ParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid filter date '{0}': expected YYYY-MM-DD")]
    DateParseError(String),
}
