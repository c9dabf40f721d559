//! Error types for embedding operations

use thiserror::Error;

use crate::config::ConfigError;

pub type Result<T> = std::result::Result<T, EmbeddingError>;

/// Why a single model attempt failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttemptError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("request timed out")]
    Timeout,

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for AttemptError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AttemptError::Timeout
        } else {
            AttemptError::Request(err.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Every configured model failed; carries the last failure
    #[error("All {attempts} embedding model(s) failed; last model {last_model}: {last_error}")]
    Exhausted {
        attempts: usize,
        last_model: String,
        last_error: AttemptError,
    },
}
