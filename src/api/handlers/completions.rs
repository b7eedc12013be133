//! Handlers for the completion endpoints.

use axum::extract::{Path, State};
use axum::Json;
use std::sync::Arc;

use crate::api::blocking::blocking;
use crate::api::error::ApiError;
use crate::api::types::{CompletionResponse, CreateCompletionRequest, MessageResponse};
use crate::api::AppState;
use crate::domain::{Completion, CompletionId, HabitId};
use crate::storage::{HabitStore, StorageError};

/// `GET /api/completions` — all completions across all habits
pub async fn list_completions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CompletionResponse>>, ApiError> {
    let store = state.store.clone();
    blocking(move || -> Result<Vec<CompletionResponse>, StorageError> {
        let completions = store.list_completions()?;
        Ok(completions
            .iter()
            .map(CompletionResponse::from_completion)
            .collect::<Vec<_>>())
    })
    .await
    .map(Json)
}

/// `POST /api/completions` — record a completion for a habit and date
pub async fn create_completion(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateCompletionRequest>,
) -> Result<Json<CompletionResponse>, ApiError> {
    let habit_id = HabitId::from_string(&req.habit_id)
        .map_err(|_| ApiError::BadRequest("Invalid habit id".to_owned()))?;

    let completion = Completion::new(habit_id, req.completed_date);

    let store = state.store.clone();
    let created = blocking(move || -> Result<Completion, StorageError> {
        store.create_completion(&completion)?;
        Ok(completion)
    })
    .await?;

    Ok(Json(CompletionResponse::from_completion(&created)))
}

/// `DELETE /api/completions/{id}` — remove a single completion
pub async fn delete_completion(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let completion_id = CompletionId::from_string(&id)
        .map_err(|_| ApiError::BadRequest("Invalid completion id".to_owned()))?;

    let store = state.store.clone();
    blocking(move || store.delete_completion(&completion_id)).await?;

    Ok(Json(MessageResponse {
        message: "Completion deleted successfully".to_owned(),
    }))
}
