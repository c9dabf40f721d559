//! Text embeddings and vector similarity
//!
//! This crate turns text into embedding vectors through an OpenAI-compatible
//! embeddings endpoint and compares vectors by cosine similarity.
//!
//! ## Features
//! - Ordered model fallback: each configured model is tried once, in order
//! - Explicit, load-once configuration (`EmbeddingConfig`)
//! - Cosine similarity with length checking

pub mod client;
pub mod config;
pub mod error;
pub mod similarity;

pub use client::{Embedder, EmbeddingClient, FallbackOutcome, ModelFailure};
pub use config::{ConfigError, EmbeddingConfig};
pub use error::{AttemptError, EmbeddingError, Result};
pub use similarity::{cosine_similarity, try_cosine_similarity};
pub use feedscope_core::EmbeddingVector;
