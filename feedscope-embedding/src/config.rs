//! Embedding provider configuration
//!
//! Built once (usually from the environment) and moved into the client.
//! Nothing here is read again per request.

use std::env;
use std::fmt;
use std::time::Duration;

/// Default OpenAI-compatible API base
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Models in preference order: newer and cheaper first, legacy last
pub const DEFAULT_MODELS: [&str; 2] = ["text-embedding-3-small", "text-embedding-ada-002"];

const DEFAULT_TIMEOUT_SECS: u64 = 30;

const API_KEY_VAR: &str = "OPENAI_API_KEY";
const API_BASE_VAR: &str = "OPENAI_API_BASE";
const MODELS_VAR: &str = "EMBEDDING_MODELS";
const TIMEOUT_VAR: &str = "EMBEDDING_TIMEOUT_SECS";

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY is not set in the environment")]
    MissingApiKey,

    #[error("No embedding models configured")]
    NoModels,

    #[error("Invalid value for {field}: {error}")]
    Invalid { field: String, error: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Credentials and model list for the embeddings endpoint
#[derive(Clone)]
pub struct EmbeddingConfig {
    api_key: String,
    api_base: String,
    models: Vec<String>,
    request_timeout: Duration,
}

impl EmbeddingConfig {
    /// Create a config with default endpoint, models and timeout
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        Ok(Self {
            api_key,
            api_base: DEFAULT_API_BASE.to_string(),
            models: DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Load configuration from environment variables
    ///
    /// Expects:
    /// - OPENAI_API_KEY: provider credential (required)
    /// - OPENAI_API_BASE: endpoint base URL (optional)
    /// - EMBEDDING_MODELS: comma-separated models in preference order (optional)
    /// - EMBEDDING_TIMEOUT_SECS: per-request timeout (optional)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR).ok_or(ConfigError::MissingApiKey)?;
        let mut config = Self::new(api_key)?;

        if let Some(base) = lookup(API_BASE_VAR).filter(|b| !b.trim().is_empty()) {
            config = config.with_api_base(base.trim());
        }

        if let Some(models) = lookup(MODELS_VAR) {
            config = config.with_models(models.split(','))?;
        }

        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let secs: u64 = raw.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::Invalid {
                    field: TIMEOUT_VAR.to_string(),
                    error: e.to_string(),
                }
            })?;
            if secs == 0 {
                return Err(ConfigError::Invalid {
                    field: TIMEOUT_VAR.to_string(),
                    error: "timeout must be positive".to_string(),
                });
            }
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Replace the model list; blank names are ignored
    pub fn with_models<I, S>(mut self, models: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let models: Vec<String> = models
            .into_iter()
            .map(|m| m.as_ref().trim().to_string())
            .filter(|m| !m.is_empty())
            .collect();

        if models.is_empty() {
            return Err(ConfigError::NoModels);
        }

        self.models = models;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Full URL of the embeddings endpoint
    pub fn embeddings_url(&self) -> String {
        format!("{}/embeddings", self.api_base.trim_end_matches('/'))
    }
}

impl fmt::Debug for EmbeddingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddingConfig")
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("models", &self.models)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_missing_api_key() {
        let result = EmbeddingConfig::from_lookup(lookup_from(&[]));
        assert_eq!(result.unwrap_err(), ConfigError::MissingApiKey);
    }

    #[test]
    fn test_blank_api_key() {
        let result = EmbeddingConfig::from_lookup(lookup_from(&[("OPENAI_API_KEY", "   ")]));
        assert_eq!(result.unwrap_err(), ConfigError::MissingApiKey);
    }

    #[test]
    fn test_defaults() {
        let config = EmbeddingConfig::from_lookup(lookup_from(&[("OPENAI_API_KEY", "sk-test")]))
            .unwrap();
        assert_eq!(config.api_key(), "sk-test");
        assert_eq!(config.models(), &["text-embedding-3-small", "text-embedding-ada-002"]);
        assert_eq!(config.embeddings_url(), "https://api.openai.com/v1/embeddings");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_overrides() {
        let config = EmbeddingConfig::from_lookup(lookup_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_API_BASE", "http://localhost:9000/v1/"),
            ("EMBEDDING_MODELS", " model-a , ,model-b"),
            ("EMBEDDING_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.embeddings_url(), "http://localhost:9000/v1/embeddings");
        assert_eq!(config.models(), &["model-a", "model-b"]);
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_empty_model_list() {
        let result = EmbeddingConfig::from_lookup(lookup_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("EMBEDDING_MODELS", " , "),
        ]));
        assert_eq!(result.unwrap_err(), ConfigError::NoModels);
    }

    #[test]
    fn test_invalid_timeout() {
        let result = EmbeddingConfig::from_lookup(lookup_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("EMBEDDING_TIMEOUT_SECS", "soon"),
        ]));
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = EmbeddingConfig::new("sk-secret").unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
