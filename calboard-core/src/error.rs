//! Error types for calboard.

use thiserror::Error;

/// Errors that can occur in calboard operations.
#[derive(Error, Debug)]
pub enum CalboardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Submission not found: {0}")]
    SubmissionNotFound(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Request timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Request cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Unknown event color '{0}'")]
    InvalidColor(String),

    #[error("Unknown calendar view '{0}'")]
    InvalidView(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD or YYYY-MM-DDTHH:MM")]
    InvalidDate(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

impl From<serde_json::Error> for CalboardError {
    fn from(e: serde_json::Error) -> Self {
        CalboardError::Serialization(e.to_string())
    }
}

/// Result type alias for calboard operations.
pub type CalboardResult<T> = Result<T, CalboardError>;
