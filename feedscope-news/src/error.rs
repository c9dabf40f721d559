//! Error types for feed fetching

use thiserror::Error;

/// Errors that can occur while retrieving a feed
#[derive(Debug, Error)]
pub enum FetchError {
    /// The feed URL could not be parsed
    #[error("Invalid feed URL '{url}': {message}")]
    InvalidUrl {
        /// URL as given by the caller
        url: String,
        /// Parser message
        message: String,
    },

    /// HTTP request failed before a response arrived
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    /// Request exceeded the client timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Server answered with a non-success status
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Body was neither a valid RSS nor Atom document
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(err.to_string())
        } else {
            FetchError::RequestFailed(err.to_string())
        }
    }
}
