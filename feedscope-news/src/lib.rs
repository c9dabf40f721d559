//! Feed fetching for the feedscope pipeline
//!
//! This crate provides:
//! - RSS/Atom retrieval and parsing (`RssClient`)
//! - Normalization of raw entries into `FeedItem` and `FeedArticle`
//! - Comma-separated keyword filtering (`KeywordFilter`)

pub mod error;
pub mod filter;
pub mod rss_client;

pub use error::FetchError;
pub use filter::KeywordFilter;
pub use rss_client::{ArticleSource, RawEntry, RssClient};
