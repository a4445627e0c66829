//! HTTP route handlers for the prompt optimizer API.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::Value;

use crate::optimizer::{OptimizeError, OptimizeOutput, OptimizeRequest};

use super::state::AppState;

/// Body returned for any dispatch failure; the cause is only logged.
pub const PROCESSING_FAILED_MESSAGE: &str = "Failed to process prompt";

/// Create the API router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/optimize", post(optimize))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "prompt-optimizer",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

impl IntoResponse for OptimizeError {
    fn into_response(self) -> Response {
        let (status, error) = if self.is_client_error() {
            (StatusCode::BAD_REQUEST, self.to_string())
        } else {
            tracing::error!(error = %self, "Failed to process prompt");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                PROCESSING_FAILED_MESSAGE.to_string(),
            )
        };
        (status, Json(ErrorResponse { error })).into_response()
    }
}

/// Handle optimize requests.
///
/// The body is decoded leniently: anything that is not a JSON document is
/// treated as an empty object and ends up as a missing-prompt error.
async fn optimize(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<OptimizeOutput>, OptimizeError> {
    let request = OptimizeRequest::from_json(&decode_body(&body));
    let output = state.dispatcher.optimize(request).await?;
    Ok(Json(output))
}

fn decode_body(body: &[u8]) -> Value {
    if body.is_empty() {
        return Value::Object(serde_json::Map::new());
    }
    serde_json::from_slice(body).unwrap_or_else(|e| {
        tracing::debug!("Ignoring undecodable request body: {e}");
        Value::Object(serde_json::Map::new())
    })
}
