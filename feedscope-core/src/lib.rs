//! Core types for the feedscope pipeline
//!
//! This crate defines the shared data structures used across the workspace:
//! normalized feed entries, embedding vectors, category prototypes and the
//! results produced by categorization.

pub mod category;
pub mod error;
pub mod feed;

pub use category::{
    CategorizationResult, CategoryPrototype, CategorySpec, EmbeddingVector, ScoredCategory,
};
pub use error::ContractViolation;
pub use feed::{FeedArticle, FeedItem, StoredFeedItem};
