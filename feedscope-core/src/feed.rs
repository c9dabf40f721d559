//! Feed data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Minimal article view used for categorization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedArticle {
    pub title: String,
    pub snippet: String,
}

impl FeedArticle {
    pub fn new(title: impl Into<String>, snippet: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            snippet: snippet.into(),
        }
    }

    /// Text submitted to the embedding model: title, newline, snippet
    pub fn embedding_text(&self) -> String {
        format!("{}\n{}", self.title, self.snippet)
    }
}

/// A feed entry with every field the HTTP surface exposes
///
/// Missing fields are empty strings rather than absent, so clients never
/// need to special-case nulls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    /// Publication date as written in the feed
    pub pub_date: String,
    /// Raw (possibly HTML) body
    pub content: String,
    /// Plain-text rendering of `content`
    pub content_snippet: String,
    pub author: String,
    /// Publication date normalized to RFC 3339, empty when unparseable
    pub iso_date: String,
}

/// A feed item held by the in-memory store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFeedItem {
    pub id: u64,
    #[serde(flatten)]
    pub item: FeedItem,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedding_text_joins_title_and_snippet() {
        let article = FeedArticle::new("Rates hold", "The central bank left rates unchanged");
        assert_eq!(
            article.embedding_text(),
            "Rates hold\nThe central bank left rates unchanged"
        );
    }

    #[test]
    fn test_feed_item_serializes_camel_case() {
        let item = FeedItem {
            title: "Title".to_string(),
            pub_date: "Mon, 06 Jan 2025 10:00:00 GMT".to_string(),
            content_snippet: "snippet".to_string(),
            ..FeedItem::default()
        };

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["pubDate"], "Mon, 06 Jan 2025 10:00:00 GMT");
        assert_eq!(json["contentSnippet"], "snippet");
        assert_eq!(json["isoDate"], "");
    }

    #[test]
    fn test_stored_item_flattens_fields() {
        let stored = StoredFeedItem {
            id: 7,
            item: FeedItem {
                title: "Flattened".to_string(),
                ..FeedItem::default()
            },
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&stored).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["title"], "Flattened");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("item").is_none());
    }
}
