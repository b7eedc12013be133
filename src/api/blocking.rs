//! Helper for running blocking store operations in async handlers.
//!
//! The SQLite store is synchronous; handlers push each store call onto the
//! blocking pool and map join or operation failures into `ApiError`.

use tokio::task::spawn_blocking;

use crate::api::error::ApiError;

/// Runs a blocking closure and maps its error into `ApiError`.
pub async fn blocking<T, E, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    E: Into<ApiError> + Send + 'static,
    T: Send + 'static,
{
    spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(format!("Task join error: {}", e)))?
        .map_err(Into::into)
}
