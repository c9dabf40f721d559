//! Batch categorization of a feed's latest articles
//!
//! Usage: `categorize-feed [FEED_URL]`

use std::num::NonZeroUsize;

use anyhow::Context;
use feedscope_api::config::{init_tracing, load_dotenv, ServerConfig};
use feedscope_core::{CategorizationResult, CategorySpec};
use feedscope_embedding::EmbeddingClient;
use feedscope_news::RssClient;
use feedscope_services::{ArticleCategorization, Categorizer};
use tracing::error;

const DEFAULT_FEED_URL: &str = "https://feeds.marketwatch.com/marketwatch/topstories";

const ARTICLE_COUNT: NonZeroUsize = match NonZeroUsize::new(5) {
    Some(count) => count,
    None => unreachable!(),
};

fn demo_categories() -> Vec<CategorySpec> {
    [
        "Private equity investments or acquisitions in Canada",
        "Industrial automation or robotics M&A in North America",
    ]
    .into_iter()
    .map(|topic| CategorySpec::new(topic, topic))
    .collect()
}

fn format_scores(result: &CategorizationResult) -> String {
    result
        .scores
        .iter()
        .map(|s| format!("{}: {:.4}", s.name, s.score))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn print_categorization(entry: &ArticleCategorization) {
    println!("Title: {}", entry.article.title);
    println!(
        "Category: {}",
        entry.result.matched_category.as_deref().unwrap_or("No match")
    );
    println!("{}", format_scores(&entry.result));
    println!("---");
}

async fn run(feed_url: &str) -> anyhow::Result<()> {
    let client = EmbeddingClient::from_env().context("embedding client configuration")?;
    let categorizer = Categorizer::new(client);

    let prototypes = categorizer.embed_prototypes(&demo_categories()).await?;

    let source = RssClient::with_timeout(ServerConfig::from_env().feed_timeout)?;
    let results = categorizer
        .categorize_feed(&source, feed_url, ARTICLE_COUNT, &prototypes)
        .await?;

    for entry in &results {
        print_categorization(entry);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    init_tracing("info");

    let feed_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_FEED_URL.to_string());

    if let Err(e) = run(&feed_url).await {
        error!("Categorization of {} failed: {:#}", feed_url, e);
        return Err(e);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedscope_core::ScoredCategory;

    #[test]
    fn test_format_scores() {
        let result = CategorizationResult {
            scores: vec![
                ScoredCategory {
                    name: "Canadian PE".to_string(),
                    score: 0.81234,
                },
                ScoredCategory {
                    name: "Robotics M&A".to_string(),
                    score: 0.5,
                },
            ],
            matched_category: Some("Canadian PE".to_string()),
        };

        assert_eq!(
            format_scores(&result),
            "Canadian PE: 0.8123 | Robotics M&A: 0.5000"
        );
    }
}
