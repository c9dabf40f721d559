//! Categorization endpoint

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use serde::Deserialize;
use tracing::{error, warn};

use feedscope_core::CategorySpec;
use feedscope_services::CategorizeError;

use crate::AppState;

/// Request body for categorizing a piece of text
#[derive(Debug, Deserialize)]
pub struct CategorizeRequest {
    pub text: String,
    pub categories: Vec<CategorySpec>,
}

/// Create categorization routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/categorize", post(categorize))
}

/// POST /api/categorize - Score text against ad hoc categories
async fn categorize(
    State(state): State<AppState>,
    Json(request): Json<CategorizeRequest>,
) -> impl IntoResponse {
    let Some(categorizer) = state.categorizer else {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({
                "message": "Categorization not configured. Set OPENAI_API_KEY."
            })),
        )
            .into_response();
    };

    let result = async {
        let prototypes = categorizer.embed_prototypes(&request.categories).await?;
        categorizer
            .categorize_article(&request.text, &prototypes)
            .await
    }
    .await;

    match result {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => {
            let status = match &e {
                CategorizeError::Contract(_) => {
                    warn!("Rejected categorization request: {}", e);
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                CategorizeError::Embedding(_) | CategorizeError::Fetch(_) => {
                    error!("Categorization failed: {}", e);
                    StatusCode::BAD_GATEWAY
                }
            };
            (
                status,
                Json(serde_json::json!({
                    "message": e.to_string()
                })),
            )
                .into_response()
        }
    }
}
