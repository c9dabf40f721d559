//! Keyword filtering for feed items

use feedscope_core::FeedItem;

/// Case-insensitive "any keyword" filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordFilter {
    keywords: Vec<String>,
}

impl KeywordFilter {
    /// Parse a comma-separated keyword list
    ///
    /// Tokens are trimmed and lowercased, empty tokens are dropped.
    pub fn parse(raw: &str) -> Self {
        let keywords = raw
            .split(',')
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// An empty filter lets every item through
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// True when the item's title or content contains any keyword
    pub fn matches(&self, item: &FeedItem) -> bool {
        if self.keywords.is_empty() {
            return true;
        }
        let text = format!("{} {}", item.title, item.content).to_lowercase();
        self.keywords.iter().any(|keyword| text.contains(keyword))
    }

    /// Keep matching items, preserving order
    pub fn apply(&self, items: Vec<FeedItem>) -> Vec<FeedItem> {
        if self.is_empty() {
            return items;
        }
        items.into_iter().filter(|item| self.matches(item)).collect()
    }
}
