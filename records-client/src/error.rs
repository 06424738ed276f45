//! Client error types

use shared::models::RowViolation;
use thiserror::Error;

use crate::ingest::PerRecordReport;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request rejected by the server (400)
    ///
    /// `violations` lists offending rows when the server reported them.
    #[error("{message}")]
    Validation {
        message: String,
        violations: Vec<RowViolation>,
    },

    /// Per-record upload where some rows were not stored
    ///
    /// The report says which rows failed and why, whatever the cause.
    #[error(
        "{} of {} record(s) were not stored",
        report.failed.len(),
        report.failed.len() + report.created.len()
    )]
    PartialUpload { report: PerRecordReport },

    /// Server-side failure (5xx)
    #[error("Server error: {0}")]
    Server(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
