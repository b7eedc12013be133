//! Handlers for the habit endpoints.

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use std::sync::Arc;

use crate::api::blocking::blocking;
use crate::api::error::ApiError;
use crate::api::types::{CreateHabitRequest, HabitResponse, MessageResponse, UpdateHabitRequest};
use crate::api::AppState;
use crate::domain::{streak, Habit, HabitId};
use crate::storage::{HabitStore, StorageError};

fn parse_habit_id(id: &str) -> Result<HabitId, ApiError> {
    HabitId::from_string(id).map_err(|_| ApiError::BadRequest("Invalid habit id".to_owned()))
}

/// `GET /api/habits` — all habits, each enriched with its current streak
pub async fn list_habits(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<HabitResponse>>, ApiError> {
    let store = state.store.clone();
    blocking(move || -> Result<Vec<HabitResponse>, StorageError> {
        let today = Utc::now().naive_utc().date();
        let habits = store.list_habits()?;

        let mut out = Vec::with_capacity(habits.len());
        for habit in habits {
            let dates = store.completion_dates(&habit.id)?;
            let current = streak::current_streak(&dates, today);
            out.push(HabitResponse::from_habit(&habit, current));
        }
        Ok(out)
    })
    .await
    .map(Json)
}

/// `POST /api/habits` — create a habit; a brand new habit has no streak
pub async fn create_habit(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateHabitRequest>,
) -> Result<Json<HabitResponse>, ApiError> {
    let habit = Habit::new(req.name, req.emoji)?;

    let store = state.store.clone();
    let created = blocking(move || -> Result<Habit, StorageError> {
        store.create_habit(&habit)?;
        Ok(habit)
    })
    .await?;

    Ok(Json(HabitResponse::from_habit(&created, 0)))
}

/// `PUT /api/habits/{id}` — overwrite name/emoji, return the record with a
/// recomputed streak
pub async fn update_habit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateHabitRequest>,
) -> Result<Json<HabitResponse>, ApiError> {
    let habit_id = parse_habit_id(&id)?;

    let store = state.store.clone();
    blocking(move || -> Result<HabitResponse, ApiError> {
        let mut habit = store.get_habit(&habit_id)?;
        habit.rename(req.name, req.emoji)?;
        store.update_habit(&habit)?;

        let today = Utc::now().naive_utc().date();
        let dates = store.completion_dates(&habit.id)?;
        Ok(HabitResponse::from_habit(
            &habit,
            streak::current_streak(&dates, today),
        ))
    })
    .await
    .map(Json)
}

/// `DELETE /api/habits/{id}` — remove the habit and its completions
pub async fn delete_habit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let habit_id = parse_habit_id(&id)?;

    let store = state.store.clone();
    blocking(move || store.delete_habit(&habit_id)).await?;

    Ok(Json(MessageResponse {
        message: "Habit deleted successfully".to_owned(),
    }))
}
