//! Typed API error for HTTP handlers.
//!
//! Converts domain and storage errors into proper HTTP responses with a JSON
//! body and status code. Handlers return `Result<Json<T>, ApiError>` instead
//! of losing error context with a bare `StatusCode`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::domain::DomainError;
use crate::storage::StorageError;

/// API error with HTTP status code and human-readable message.
///
/// Converts to a JSON response: `{"error": "message"}`.
///
/// `Internal` logs the real error server-side and returns a static message
/// to the client — no error detail leakage.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request — invalid input from caller.
    BadRequest(String),
    /// 404 Not Found — referenced habit or completion doesn't exist.
    NotFound(String),
    /// Duplicate `(habit_id, completed_date)` insert. The web client
    /// contract surfaces this as a plain 400.
    Conflict(String),
    /// 500 Internal Server Error — storage failure. Details logged, not exposed.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::Conflict(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Internal(detail) => {
                tracing::error!(error = %detail, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_owned())
            }
        };
        let body = serde_json::json!({ "error": message });
        (status, Json(body)).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::HabitNotFound { .. } => Self::NotFound("Habit not found".to_owned()),
            StorageError::CompletionNotFound { .. } => {
                Self::NotFound("Completion not found".to_owned())
            }
            StorageError::DuplicateCompletion { .. } => {
                Self::Conflict("Completion already exists".to_owned())
            }
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::BadRequest(err.to_string())
    }
}
