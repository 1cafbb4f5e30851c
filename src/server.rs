use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::analysis::AnalysisPipeline;
use crate::error::Error;
use crate::models::AnalysisResult;

pub const RATE_LIMIT_MESSAGE: &str =
    "GitHub API rate limit exceeded. Add GITHUB_TOKEN to .env for higher limits.";

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<AnalysisPipeline>,
}

impl AppState {
    pub fn new(pipeline: AnalysisPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/analyze/{username}", get(analyze))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn analyze(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let result = state.pipeline.analyze_user(&username).await?;
    Ok(Json(result))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Wraps pipeline errors so only the status and a fixed message reach
/// the client.
#[derive(Debug)]
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            Error::UserNotFound(login) => {
                tracing::info!("user not found: {}", login);
                (StatusCode::NOT_FOUND, "User not found")
            }
            Error::RateLimited(secs) => {
                tracing::warn!("GitHub rate limit hit, resets in {}s", secs);
                (StatusCode::FORBIDDEN, RATE_LIMIT_MESSAGE)
            }
            other => {
                tracing::error!("Analysis error: {:?}", other);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to analyze profile")
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
