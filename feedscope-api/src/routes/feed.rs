//! Feed endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::error;

use feedscope_services::{parse_limit, FeedQuery, FeedServiceError};

use crate::AppState;

/// Query parameters for fetching a feed
#[derive(Debug, Deserialize)]
pub struct FeedParams {
    /// Feed URL
    pub url: Option<String>,
    /// Comma-separated keywords
    pub keywords: Option<String>,
    /// Maximum number of items, kept raw so bad input means "no limit"
    pub limit: Option<String>,
}

/// Create feed routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/feed", get(get_feed))
        .route("/feed/stored", get(get_stored_items))
}

/// GET /api/feed?url=...&keywords=...&limit=... - Fetch and filter a feed
async fn get_feed(
    State(state): State<AppState>,
    Query(params): Query<FeedParams>,
) -> impl IntoResponse {
    let query = FeedQuery {
        url: params.url.unwrap_or_default(),
        keywords: params.keywords,
        limit: parse_limit(params.limit.as_deref()),
    };

    match state.feed_service.fetch_filtered(&query).await {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(FeedServiceError::MissingUrl) => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "message": FeedServiceError::MissingUrl.to_string()
            })),
        )
            .into_response(),
        Err(e) => {
            error!("Error fetching RSS feed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "message": e.to_string()
                })),
            )
                .into_response()
        }
    }
}

/// GET /api/feed/stored - Items kept from the last feed request
async fn get_stored_items(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.feed_service.store().get_feed_items())
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request, http::StatusCode};

    use crate::routes::test_support::{json_body, send, state};

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel><title>T</title><link>https://example.com</link><description>D</description>
<item><title>Canada buyout</title><link>https://example.com/1</link><description>Private equity</description></item>
<item><title>Local news</title><link>https://example.com/2</link><description>Nothing here</description></item>
</channel></rss>"#;

    #[tokio::test]
    async fn test_missing_url_is_bad_request() {
        let response = send(
            state(None),
            Request::get("/api/feed").body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["message"], "RSS feed URL is required");
    }

    #[tokio::test]
    async fn test_filters_and_stores() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/rss")
            .with_status(200)
            .with_body(FEED)
            .create_async()
            .await;

        let app_state = state(None);
        let uri = format!(
            "/api/feed?url={}/rss&keywords=canada&limit=abc",
            server.url()
        );
        let response = send(
            app_state.clone(),
            Request::get(uri.as_str()).body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let items = body.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["title"], "Canada buyout");
        assert_eq!(items[0]["contentSnippet"], "Private equity");

        let stored = send(
            app_state,
            Request::get("/api/feed/stored").body(Body::empty()).unwrap(),
        )
        .await;
        let stored = json_body(stored).await;
        assert_eq!(stored[0]["id"], 1);
        assert_eq!(stored[0]["title"], "Canada buyout");
    }

    #[tokio::test]
    async fn test_fetch_failure_is_server_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/rss")
            .with_status(200)
            .with_body("<html>nope</html>")
            .create_async()
            .await;

        let uri = format!("/api/feed?url={}/rss", server.url());
        let response = send(
            state(None),
            Request::get(uri.as_str()).body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert!(body["message"].as_str().unwrap().contains("Parse error"));
    }
}
