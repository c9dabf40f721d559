//! Article categorization against embedded category prototypes
//!
//! Pipeline: embed the article text, score it against every prototype by
//! cosine similarity, and pick the best category if it clears the
//! confidence threshold.

use std::num::NonZeroUsize;

use futures::future::try_join_all;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, instrument};

use feedscope_core::{
    CategorizationResult, CategoryPrototype, CategorySpec, ContractViolation, FeedArticle,
    ScoredCategory,
};
use feedscope_embedding::{try_cosine_similarity, Embedder, EmbeddingError};
use feedscope_news::{ArticleSource, FetchError};

/// A best score must be strictly greater than this to count as a match
pub const CONFIDENCE_THRESHOLD: f64 = 0.8;

#[derive(Debug, Error)]
pub enum CategorizeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error(transparent)]
    Contract(#[from] ContractViolation),
}

/// One article together with its categorization
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleCategorization {
    pub article: FeedArticle,
    pub result: CategorizationResult,
}

/// Leftmost highest score
///
/// Ties go to the earliest entry: a later entry replaces the current best
/// only when strictly greater.
pub fn best_score(scores: &[ScoredCategory]) -> Option<&ScoredCategory> {
    scores
        .iter()
        .reduce(|best, current| if current.score > best.score { current } else { best })
}

/// Best score, if it is strictly above `threshold`
pub fn select_match(scores: &[ScoredCategory], threshold: f64) -> Option<&ScoredCategory> {
    best_score(scores).filter(|best| best.score > threshold)
}

pub struct Categorizer<E> {
    embedder: E,
}

impl<E: Embedder> Categorizer<E> {
    pub fn new(embedder: E) -> Self {
        Self { embedder }
    }

    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    /// Embed category prompts into prototypes
    ///
    /// Requests run concurrently; the output keeps the order of `specs`.
    #[instrument(skip_all, fields(categories = specs.len()))]
    pub async fn embed_prototypes(
        &self,
        specs: &[CategorySpec],
    ) -> Result<Vec<CategoryPrototype>, CategorizeError> {
        let embeddings =
            try_join_all(specs.iter().map(|spec| self.embedder.embed(&spec.prompt))).await?;

        Ok(specs
            .iter()
            .zip(embeddings)
            .map(|(spec, embedding)| CategoryPrototype::new(spec.name.clone(), embedding))
            .collect())
    }

    /// Score one article against precomputed prototypes
    ///
    /// Prototype vectors are used as given, never re-embedded. Scores keep
    /// prototype order.
    #[instrument(skip_all, fields(prototypes = prototypes.len()))]
    pub async fn categorize_article(
        &self,
        article_text: &str,
        prototypes: &[CategoryPrototype],
    ) -> Result<CategorizationResult, CategorizeError> {
        check_prototypes(prototypes)?;

        let article_embedding = self.embedder.embed(article_text).await?;

        let scores = prototypes
            .iter()
            .map(|prototype| -> Result<ScoredCategory, ContractViolation> {
                let score = try_cosine_similarity(&article_embedding, &prototype.embedding)
                    .map_err(|_| {
                        ContractViolation::dimension_mismatch(
                            format!("category '{}'", prototype.name),
                            article_embedding.len(),
                            prototype.embedding.len(),
                        )
                    })?;
                Ok(ScoredCategory {
                    name: prototype.name.clone(),
                    score,
                })
            })
            .collect::<Result<Vec<_>, ContractViolation>>()?;

        let matched_category =
            select_match(&scores, CONFIDENCE_THRESHOLD).map(|best| best.name.clone());

        debug!("Matched category: {:?}", matched_category);

        Ok(CategorizationResult {
            scores,
            matched_category,
        })
    }

    /// Fetch up to `max_items` articles and categorize each in turn
    ///
    /// The first failure aborts the batch; no partial results are returned.
    #[instrument(skip(self, source, prototypes))]
    pub async fn categorize_feed<S>(
        &self,
        source: &S,
        url: &str,
        max_items: NonZeroUsize,
        prototypes: &[CategoryPrototype],
    ) -> Result<Vec<ArticleCategorization>, CategorizeError>
    where
        S: ArticleSource + ?Sized,
    {
        check_prototypes(prototypes)?;

        let articles = source.fetch_articles(url, max_items).await?;
        info!("Categorizing {} articles from {}", articles.len(), url);

        let mut results = Vec::with_capacity(articles.len());
        for article in articles {
            let result = self
                .categorize_article(&article.embedding_text(), prototypes)
                .await?;
            results.push(ArticleCategorization { article, result });
        }

        Ok(results)
    }
}

/// Non-empty, and every prototype has the same dimension
fn check_prototypes(prototypes: &[CategoryPrototype]) -> Result<(), ContractViolation> {
    let first = prototypes.first().ok_or(ContractViolation::EmptyPrototypes)?;
    let expected = first.embedding.len();

    for prototype in &prototypes[1..] {
        if prototype.embedding.len() != expected {
            return Err(ContractViolation::dimension_mismatch(
                format!("category '{}'", prototype.name),
                expected,
                prototype.embedding.len(),
            ));
        }
    }

    Ok(())
}
