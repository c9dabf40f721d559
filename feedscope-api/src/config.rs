//! Process-level configuration for the binaries

use std::env;
use std::time::Duration;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_FEED_TIMEOUT_SECS: u64 = 10;

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Timeout for each feed request
    pub feed_timeout: Duration,
}

impl ServerConfig {
    /// Read SERVER_PORT and FEED_TIMEOUT_SECS, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("SERVER_PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let feed_timeout_secs = lookup("FEED_TIMEOUT_SECS")
            .and_then(|t| t.trim().parse().ok())
            .filter(|secs: &u64| *secs > 0)
            .unwrap_or(DEFAULT_FEED_TIMEOUT_SECS);

        Self {
            port,
            feed_timeout: Duration::from_secs(feed_timeout_secs),
        }
    }
}

/// Load environment variables from .env.local, if present
pub fn load_dotenv() {
    if let Err(e) = dotenvy::from_filename(".env.local") {
        // Not an error if the file doesn't exist
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env.local: {}", e);
        }
    }
}

/// Install the global tracing subscriber; RUST_LOG overrides `default_filter`
pub fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(|_| None);
        assert_eq!(config.port, 3001);
        assert_eq!(config.feed_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_overrides_and_garbage() {
        let config = ServerConfig::from_lookup(|key| match key {
            "SERVER_PORT" => Some("8080".to_string()),
            "FEED_TIMEOUT_SECS" => Some("zero".to_string()),
            _ => None,
        });
        assert_eq!(config.port, 8080);
        assert_eq!(config.feed_timeout, Duration::from_secs(10));
    }
}
