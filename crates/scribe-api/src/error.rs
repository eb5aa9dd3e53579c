//! HTTP error mapping.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::error;

/// Fixed message for missing notes.
pub const NOTE_NOT_FOUND: &str = "Note not found";

/// Errors surfaced to API callers.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed or missing input; never reaches the store (422).
    Validation(String),
    /// No note with the requested id (404).
    NotFound(String),
    /// Store or transport failure (500). The message is opaque.
    Internal(String),
    /// Store unreachable during a health probe (503).
    Unavailable(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl From<scribe_core::Error> for ApiError {
    fn from(err: scribe_core::Error) -> Self {
        match err {
            scribe_core::Error::NoteNotFound(_) => ApiError::NotFound(NOTE_NOT_FOUND.to_string()),
            scribe_core::Error::InvalidInput(msg) => ApiError::Validation(msg),
            other => {
                error!(subsystem = "api", error = %other, "Request failed");
                ApiError::Internal("Internal server error".to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = match self {
            ApiError::Validation(msg)
            | ApiError::NotFound(msg)
            | ApiError::Internal(msg)
            | ApiError::Unavailable(msg) => msg,
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
