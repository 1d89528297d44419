/// Error types for backend API calls
use thiserror::Error;

/// Errors returned by the backend client
#[derive(Debug, Error)]
pub enum ApiError {
    /// No base URL was configured
    #[error("API base URL is not configured")]
    NotConfigured,

    /// Transport-level failure (DNS, TLS, timeout, connection reset)
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status
    #[error("{message}")]
    Status {
        status: u16,
        /// Backend-provided message, or a generic fallback
        message: String,
    },

    /// The body was not the JSON we expected
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
