//! Centralized error types for the betpool core

use thiserror::Error;

/// Main error type for indexer access, storage, and configuration.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Network failure: {0}")]
    Network(String),

    #[error("Indexer returned errors: {0}")]
    Indexer(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Parse failure: {0}")]
    Parse(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Rejection reasons produced by the action authenticator.
///
/// These are recovered locally and surfaced to callers; they never cross the
/// authentication boundary as fatal errors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    #[error("bad_signature")]
    BadSignature,

    #[error("stale_timestamp")]
    StaleTimestamp,

    #[error("unknown_action")]
    UnknownAction,

    #[error("parse_failure")]
    ParseFailure,
}

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;

impl From<reqwest::Error> for CoreError {
    fn from(err: reqwest::Error) -> Self {
        CoreError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Parse(err.to_string())
    }
}

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        CoreError::Storage(err.to_string())
    }
}
