//! feedscope HTTP API
//!
//! Exposes keyword-filtered feed retrieval and embedding-based
//! categorization over HTTP.

pub mod config;
pub mod routes;

use std::sync::Arc;

use axum::{
    http::{header, Method},
    Router,
};
use feedscope_embedding::EmbeddingClient;
use feedscope_services::{Categorizer, FeedService};
use tower_http::cors::{Any, CorsLayer};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub feed_service: Arc<FeedService>,
    /// Categorizer (optional - requires OPENAI_API_KEY)
    pub categorizer: Option<Arc<Categorizer<EmbeddingClient>>>,
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    // Configure CORS for frontend
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .nest("/api", routes::api_routes())
        .layer(cors)
        .with_state(state)
}
