//! Business logic services for feedscope
//!
//! This crate orchestrates feed fetching, embedding and similarity into
//! article categorization, and provides the keyword-filtered feed view
//! backed by an in-memory store.

pub mod categorizer;
pub mod feed_service;
pub mod feed_store;

pub use categorizer::{
    best_score, select_match, ArticleCategorization, CategorizeError, Categorizer,
    CONFIDENCE_THRESHOLD,
};
pub use feed_service::{parse_limit, FeedQuery, FeedService, FeedServiceError};
pub use feed_store::MemFeedStore;
