//! feedscope API Server
//!
//! Serves keyword-filtered feeds and embedding-based categorization.

use std::net::SocketAddr;
use std::sync::Arc;

use feedscope_api::{
    build_router,
    config::{init_tracing, load_dotenv, ServerConfig},
    AppState,
};
use feedscope_embedding::{ConfigError, EmbeddingClient};
use feedscope_news::RssClient;
use feedscope_services::{Categorizer, FeedService, MemFeedStore};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    init_tracing("info,feedscope_api=debug");

    info!("Starting feedscope API");

    let server_config = ServerConfig::from_env();

    let feed_service = FeedService::new(
        RssClient::with_timeout(server_config.feed_timeout)?,
        Arc::new(MemFeedStore::new()),
    );

    // Categorization is optional - requires OPENAI_API_KEY
    let categorizer = match EmbeddingClient::from_env() {
        Ok(client) => {
            info!("Categorization enabled (models: {:?})", client.models());
            Some(Arc::new(Categorizer::new(client)))
        }
        Err(ConfigError::MissingApiKey) => {
            info!("OPENAI_API_KEY not set - categorization endpoint will be unavailable");
            None
        }
        Err(e) => return Err(e.into()),
    };

    let state = AppState {
        feed_service: Arc::new(feed_service),
        categorizer,
    };

    let app = build_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], server_config.port));
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
