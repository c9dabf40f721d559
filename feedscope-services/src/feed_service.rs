//! Keyword-filtered feed retrieval
//!
//! Fetches one feed, keeps items matching any keyword, applies an optional
//! limit and records the result in the in-memory store.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, instrument};

use feedscope_core::FeedItem;
use feedscope_news::{FetchError, KeywordFilter, RssClient};

use crate::feed_store::MemFeedStore;

#[derive(Debug, Error)]
pub enum FeedServiceError {
    #[error("RSS feed URL is required")]
    MissingUrl,

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Parameters of a filtered feed request
#[derive(Debug, Clone, Default)]
pub struct FeedQuery {
    pub url: String,
    /// Comma-separated keywords; absent or blank means no filtering
    pub keywords: Option<String>,
    /// Maximum number of items; absent or zero means unlimited
    pub limit: Option<usize>,
}

/// Interpret a raw `limit` parameter
///
/// Only the optional sign and the leading digits count, so `"5.0"` and
/// `"10abc"` both parse. Input without leading digits is treated as absent
/// and negative values clamp to 0; both end up meaning "no limit".
pub fn parse_limit(raw: Option<&str>) -> Option<usize> {
    let raw = raw?.trim_start();
    let (negative, rest) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() || negative {
        return None;
    }

    // Too many digits for usize is still a limit larger than any feed
    let limit = digits.parse::<usize>().unwrap_or(usize::MAX);
    Some(limit).filter(|limit| *limit > 0)
}

pub struct FeedService {
    rss_client: RssClient,
    store: Arc<MemFeedStore>,
}

impl FeedService {
    pub fn new(rss_client: RssClient, store: Arc<MemFeedStore>) -> Self {
        Self { rss_client, store }
    }

    pub fn store(&self) -> &Arc<MemFeedStore> {
        &self.store
    }

    /// Fetch, filter and limit a feed, then remember the result
    #[instrument(skip(self), fields(url = %query.url))]
    pub async fn fetch_filtered(
        &self,
        query: &FeedQuery,
    ) -> Result<Vec<FeedItem>, FeedServiceError> {
        let url = query.url.trim();
        if url.is_empty() {
            return Err(FeedServiceError::MissingUrl);
        }

        let items = self.rss_client.fetch_items(url).await?;
        let total = items.len();

        let filter = query
            .keywords
            .as_deref()
            .map(KeywordFilter::parse)
            .unwrap_or_default();
        let mut filtered = filter.apply(items);

        if let Some(limit) = query.limit.filter(|limit| *limit > 0) {
            filtered.truncate(limit);
        }

        self.store.store_feed_items(filtered.clone());

        info!(
            "Feed {}: {} items, {} after filtering (keywords={:?})",
            url,
            total,
            filtered.len(),
            filter.keywords()
        );

        Ok(filtered)
    }
}
