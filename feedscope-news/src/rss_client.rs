//! RSS/Atom feed client
//!
//! Fetches a single feed by URL and normalizes its entries.

use std::num::NonZeroUsize;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{header::USER_AGENT, Client};
use tracing::{debug, info, instrument};
use url::Url;

use feedscope_core::{FeedArticle, FeedItem};

use crate::error::FetchError;

/// Default timeout for a feed request
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const CLIENT_USER_AGENT: &str = "Feedscope/1.0";

/// Anything that can produce articles for a feed URL
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Fetch at most `max_items` articles, in feed order
    async fn fetch_articles(
        &self,
        url: &str,
        max_items: NonZeroUsize,
    ) -> Result<Vec<FeedArticle>, FetchError>;
}

/// Entry fields as found in the document, before any defaults are applied
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    pub pub_date: Option<String>,
    pub iso_date: Option<String>,
    pub author: Option<String>,
    /// Plain-text rendering of the body
    pub content_snippet: Option<String>,
    /// Rendered body (Atom content, or RSS encoded content)
    pub content: Option<String>,
    /// RSS `content:encoded`
    pub content_encoded: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
}

impl RawEntry {
    /// Reduce to title + snippet
    ///
    /// The snippet is the first non-blank of: content snippet, content,
    /// encoded content, summary, description.
    pub fn to_article(&self) -> FeedArticle {
        let snippet = first_non_empty([
            self.content_snippet.as_deref(),
            self.content.as_deref(),
            self.content_encoded.as_deref(),
            self.summary.as_deref(),
            self.description.as_deref(),
        ]);

        FeedArticle {
            title: self.title.clone().unwrap_or_default(),
            snippet: snippet.to_string(),
        }
    }

    pub fn to_item(&self) -> FeedItem {
        FeedItem {
            title: self.title.clone().unwrap_or_default(),
            link: self.link.clone().unwrap_or_default(),
            pub_date: self.pub_date.clone().unwrap_or_default(),
            content: first_non_empty([
                self.content.as_deref(),
                self.content_encoded.as_deref(),
                self.description.as_deref(),
            ])
            .to_string(),
            content_snippet: self.content_snippet.clone().unwrap_or_default(),
            author: self.author.clone().unwrap_or_default(),
            iso_date: self.iso_date.clone().unwrap_or_default(),
        }
    }

    fn from_rss_item(item: &rss::Item) -> Self {
        let body_html = first_non_empty([item.content(), item.description()]);

        let author = item
            .dublin_core_ext()
            .and_then(|dc| dc.creators().first().cloned())
            .filter(|creator| !creator.trim().is_empty())
            .or_else(|| item.author().map(str::to_string));

        Self {
            title: item.title().map(str::to_string),
            link: item.link().map(str::to_string),
            pub_date: item.pub_date().map(str::to_string),
            iso_date: item.pub_date().and_then(rfc2822_to_iso),
            author,
            content_snippet: non_empty(strip_html(body_html)),
            content: item.content().map(str::to_string),
            content_encoded: item.content().map(str::to_string),
            summary: item
                .itunes_ext()
                .and_then(|ext| ext.summary())
                .map(str::to_string),
            description: item.description().map(str::to_string),
        }
    }

    fn from_atom_entry(entry: &atom_syndication::Entry) -> Self {
        let summary = entry.summary().map(|s| s.as_str().to_string());
        let content = entry.content().and_then(|c| c.value()).map(str::to_string);
        let body_html = first_non_empty([content.as_deref(), summary.as_deref()]);

        let published = entry.published().copied().unwrap_or(*entry.updated());

        Self {
            title: Some(entry.title().as_str().to_string()),
            link: entry.links().first().map(|l| l.href().to_string()),
            pub_date: Some(published.to_rfc3339()),
            iso_date: Some(
                published
                    .with_timezone(&Utc)
                    .to_rfc3339_opts(SecondsFormat::Millis, true),
            ),
            author: entry.authors().first().map(|p| p.name().to_string()),
            content_snippet: non_empty(strip_html(body_html)),
            content,
            content_encoded: None,
            summary,
            description: None,
        }
    }
}

/// Parse an RSS or Atom document into raw entries, preserving order
pub fn parse_feed(content: &[u8]) -> Result<Vec<RawEntry>, FetchError> {
    // Try parsing as RSS first, then Atom
    if let Ok(channel) = rss::Channel::read_from(content) {
        return Ok(channel.items().iter().map(RawEntry::from_rss_item).collect());
    }

    if let Ok(atom_feed) = atom_syndication::Feed::read_from(content) {
        return Ok(atom_feed
            .entries()
            .iter()
            .map(RawEntry::from_atom_entry)
            .collect());
    }

    Err(FetchError::ParseError(
        "Document is neither a valid RSS nor Atom feed".to_string(),
    ))
}

/// Feed client
pub struct RssClient {
    client: Client,
}

impl RssClient {
    /// Create a new feed client with the default timeout
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a feed client with a custom request timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::ClientBuild(e.to_string()))?;

        Ok(Self { client })
    }

    /// Fetch every item of a feed in its full shape
    #[instrument(skip(self))]
    pub async fn fetch_items(&self, url: &str) -> Result<Vec<FeedItem>, FetchError> {
        let entries = self.fetch_entries(url).await?;
        info!("Fetched {} items from {}", entries.len(), url);
        Ok(entries.iter().map(RawEntry::to_item).collect())
    }

    /// Fetch the first `max_items` entries of a feed as articles
    #[instrument(skip(self))]
    pub async fn fetch_articles(
        &self,
        url: &str,
        max_items: NonZeroUsize,
    ) -> Result<Vec<FeedArticle>, FetchError> {
        let entries = self.fetch_entries(url).await?;
        debug!(
            "Feed {} has {} entries, keeping at most {}",
            url,
            entries.len(),
            max_items
        );
        Ok(entries
            .iter()
            .take(max_items.get())
            .map(RawEntry::to_article)
            .collect())
    }

    async fn fetch_entries(&self, url: &str) -> Result<Vec<RawEntry>, FetchError> {
        let parsed = validate_url(url)?;

        let response = self
            .client
            .get(parsed)
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::ApiError {
                status: response.status().as_u16(),
                message: format!("Failed to fetch {}", url),
            });
        }

        let content = response.bytes().await?;
        parse_feed(&content)
    }
}

#[async_trait]
impl ArticleSource for RssClient {
    async fn fetch_articles(
        &self,
        url: &str,
        max_items: NonZeroUsize,
    ) -> Result<Vec<FeedArticle>, FetchError> {
        RssClient::fetch_articles(self, url, max_items).await
    }
}

fn validate_url(url: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(FetchError::InvalidUrl {
            url: url.to_string(),
            message: format!("unsupported scheme '{}'", scheme),
        }),
    }
}

fn first_non_empty<'a, const N: usize>(candidates: [Option<&'a str>; N]) -> &'a str {
    candidates
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
        .unwrap_or_default()
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

fn rfc2822_to_iso(date: &str) -> Option<String> {
    DateTime::parse_from_rfc2822(date.trim())
        .ok()
        .map(|d| d.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Strip HTML tags from text
fn strip_html(html: &str) -> String {
    let mut result = String::new();
    let mut in_tag = false;

    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }

    result
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
