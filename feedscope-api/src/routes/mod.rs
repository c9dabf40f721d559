//! API route definitions

mod categorize;
mod feed;
mod health;

use axum::Router;
use crate::AppState;

/// Create all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(feed::routes())
        .merge(categorize::routes())
        .merge(health::routes())
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use axum::{body::Body, http::Request, response::Response};
    use feedscope_embedding::{EmbeddingClient, EmbeddingConfig};
    use feedscope_news::RssClient;
    use feedscope_services::{Categorizer, FeedService, MemFeedStore};
    use tower::ServiceExt;

    use crate::{build_router, AppState};

    pub fn state(categorizer_base: Option<String>) -> AppState {
        let categorizer = categorizer_base.map(|base| {
            let config = EmbeddingConfig::new("sk-test")
                .unwrap()
                .with_api_base(base)
                .with_models(["model-a"])
                .unwrap();
            Arc::new(Categorizer::new(EmbeddingClient::new(config).unwrap()))
        });

        AppState {
            feed_service: Arc::new(FeedService::new(
                RssClient::new().unwrap(),
                Arc::new(MemFeedStore::new()),
            )),
            categorizer,
        }
    }

    pub async fn send(state: AppState, request: Request<Body>) -> Response {
        build_router(state).oneshot(request).await.unwrap()
    }

    pub async fn json_body(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }
}
