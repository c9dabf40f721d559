//! Embedding client with ordered model fallback

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::config::{ConfigError, EmbeddingConfig};
use crate::error::{AttemptError, EmbeddingError, Result};
use feedscope_core::EmbeddingVector;

/// Anything that can turn text into an embedding vector
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<EmbeddingVector>;
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    input: &'a str,
    model: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

/// One failed model attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelFailure {
    pub model: String,
    pub error: AttemptError,
}

/// Result of walking the model list
#[derive(Debug, Clone, PartialEq)]
pub enum FallbackOutcome {
    /// A model answered; `failures` lists the models tried before it
    Embedded {
        model: String,
        vector: EmbeddingVector,
        failures: Vec<ModelFailure>,
    },
    /// Every model failed, in order
    Exhausted { failures: Vec<ModelFailure> },
}

impl FallbackOutcome {
    pub fn into_result(self) -> Result<EmbeddingVector> {
        match self {
            FallbackOutcome::Embedded { vector, .. } => Ok(vector),
            FallbackOutcome::Exhausted { mut failures } => {
                let attempts = failures.len();
                match failures.pop() {
                    Some(last) => Err(EmbeddingError::Exhausted {
                        attempts,
                        last_model: last.model,
                        last_error: last.error,
                    }),
                    None => Err(EmbeddingError::Config(ConfigError::NoModels)),
                }
            }
        }
    }
}

/// OpenAI-compatible embedding client
///
/// Each configured model gets exactly one request, in order. The first
/// success wins. Dropping the returned future cancels the request in flight.
pub struct EmbeddingClient {
    client: Client,
    config: EmbeddingConfig,
}

impl EmbeddingClient {
    /// Create a new embedding client
    ///
    /// The request timeout from `config` applies to every model attempt.
    pub fn new(config: EmbeddingConfig) -> std::result::Result<Self, ConfigError> {
        if config.models().is_empty() {
            return Err(ConfigError::NoModels);
        }

        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a client from `OPENAI_API_KEY` and friends
    pub fn from_env() -> std::result::Result<Self, ConfigError> {
        Self::new(EmbeddingConfig::from_env()?)
    }

    /// Try each model in order until one returns a vector
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn embed_with_fallback(&self, text: &str) -> FallbackOutcome {
        let models = self.config.models();
        let mut failures = Vec::new();

        for (i, model) in models.iter().enumerate() {
            match self.request_embedding(model, text).await {
                Ok(vector) => {
                    info!(
                        "Generated embedding: dimension={}, model={}",
                        vector.len(),
                        model
                    );
                    return FallbackOutcome::Embedded {
                        model: model.clone(),
                        vector,
                        failures,
                    };
                }
                Err(error) => {
                    if i + 1 < models.len() {
                        warn!("Model {} failed, trying fallback: {}", model, error);
                    } else {
                        warn!("Model {} failed, no fallback left: {}", model, error);
                    }
                    failures.push(ModelFailure {
                        model: model.clone(),
                        error,
                    });
                }
            }
        }

        FallbackOutcome::Exhausted { failures }
    }

    /// Generate embedding for arbitrary text
    pub async fn embed_text(&self, text: &str) -> Result<EmbeddingVector> {
        self.embed_with_fallback(text).await.into_result()
    }

    /// Single request against a single model
    async fn request_embedding(
        &self,
        model: &str,
        text: &str,
    ) -> std::result::Result<EmbeddingVector, AttemptError> {
        debug!("Requesting embedding from {} ({} chars)", model, text.len());

        let response = self
            .client
            .post(self.config.embeddings_url())
            .bearer_auth(self.config.api_key())
            .json(&EmbeddingRequest { input: text, model })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AttemptError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let parsed: EmbeddingResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                AttemptError::Timeout
            } else {
                AttemptError::MalformedResponse(e.to_string())
            }
        })?;

        let embedding = parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| {
                AttemptError::MalformedResponse("No embeddings returned from API".to_string())
            })?;

        if embedding.is_empty() {
            return Err(AttemptError::MalformedResponse(
                "Embedding vector is empty".to_string(),
            ));
        }

        Ok(embedding)
    }

    /// Models in the order they are tried
    pub fn models(&self) -> &[String] {
        self.config.models()
    }

    pub fn config(&self) -> &EmbeddingConfig {
        &self.config
    }
}

#[async_trait]
impl Embedder for EmbeddingClient {
    async fn embed(&self, text: &str) -> Result<EmbeddingVector> {
        self.embed_text(text).await
    }
}
