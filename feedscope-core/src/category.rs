//! Category and scoring data structures

use serde::{Deserialize, Serialize};

/// Embedding vector; dimensionality is fixed by the model that produced it
pub type EmbeddingVector = Vec<f32>;

/// A named category to be embedded from a prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySpec {
    /// Unique category name
    pub name: String,
    /// Text sent to the embedding model to build the prototype vector
    pub prompt: String,
}

impl CategorySpec {
    pub fn new(name: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prompt: prompt.into(),
        }
    }
}

/// A category with its precomputed prototype vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPrototype {
    pub name: String,
    pub embedding: EmbeddingVector,
}

impl CategoryPrototype {
    pub fn new(name: impl Into<String>, embedding: EmbeddingVector) -> Self {
        Self {
            name: name.into(),
            embedding,
        }
    }
}

/// Similarity of an article to one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCategory {
    pub name: String,
    /// Cosine similarity in [-1.0, 1.0], NaN for zero vectors
    pub score: f64,
}

/// Outcome of categorizing a single article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorizationResult {
    /// One entry per prototype, in prototype input order
    pub scores: Vec<ScoredCategory>,
    /// Best category, present only when it cleared the confidence threshold
    pub matched_category: Option<String>,
}

impl CategorizationResult {
    /// Scores sorted highest first; ties keep their input order
    pub fn ranked(&self) -> Vec<ScoredCategory> {
        let mut ranked = self.scores.clone();
        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked
    }
}
