//! Service banner and health probe.

use axum::{extract::State, response::IntoResponse, Json};
use tracing::warn;

use crate::error::ApiError;
use crate::AppState;

/// Banner returned from `/`.
pub const WELCOME_MESSAGE: &str = "Welcome to the Notes API";

pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({ "message": WELCOME_MESSAGE }))
}

/// Reports healthy only when the store answers a trivial query.
pub async fn health_check(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    if let Err(e) = state.notes.ping().await {
        warn!(subsystem = "api", error = %e, "Health check failed");
        return Err(ApiError::Unavailable("Database unavailable".to_string()));
    }

    Ok(Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    })))
}
