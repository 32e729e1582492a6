//! # Ingestion Errors
//!
//! Failure taxonomy for the Overpass path. A failed ingestion surfaces as one
//! user-facing notification and leaves the existing collections untouched;
//! unresolvable node references are not errors — they are dropped at the
//! entity level during parsing.

use thiserror::Error;

/// Errors surfaced by the Overpass ingestion path
#[derive(Debug, Error)]
pub enum IngestError {
    /// The request failed before a usable response arrived
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status
    #[error("overpass returned HTTP {0}")]
    Status(u16),

    /// The response body does not match the expected node/way schema
    #[error("invalid overpass response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for IngestError {
    fn from(err: reqwest::Error) -> Self {
        IngestError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for IngestError {
    fn from(err: serde_json::Error) -> Self {
        IngestError::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
