pub mod health;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::extractor;
use crate::models::job::JobData;
use crate::router::dispatch;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/message", post(handle_message))
        .route("/api/v1/extract", post(handle_extract))
        .with_state(state)
}

/// POST /api/v1/message
/// Action-keyed messaging endpoint. Unknown actions are ignored (204, no
/// body); every recognized action resolves to exactly one JSON response.
async fn handle_message(State(state): State<AppState>, Json(message): Json<Value>) -> Response {
    match dispatch(&state, message).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

#[derive(Deserialize)]
struct ExtractRequest {
    html: String,
}

/// POST /api/v1/extract
/// Scrapes structured job data out of a captured page. Partial pages come
/// back with sentinel values, never an error.
async fn handle_extract(Json(req): Json<ExtractRequest>) -> Result<Json<JobData>, AppError> {
    if req.html.trim().is_empty() {
        return Err(AppError::Validation("html must not be empty".to_string()));
    }
    Ok(Json(extractor::extract(&req.html)))
}
