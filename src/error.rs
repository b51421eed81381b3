//! Application error types

use std::time::Duration;
use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server error: {0}")]
    Server(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Failure of a single upstream retrieval.
///
/// Never leaves the source client: every variant is logged together with the
/// source name and then folded into an absent payload.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("source unavailable: {0}")]
    Unavailable(String),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("decode failure: {0}")]
    Decode(String),

    #[error("field missing: {0}")]
    FieldMissing(&'static str),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() || err.is_body() {
            SourceError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            SourceError::Status(status.as_u16())
        } else {
            SourceError::Unavailable(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Decode(err.to_string())
    }
}
