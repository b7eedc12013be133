//! Request and response bodies for the HTTP API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Completion, Habit};

/// Body for `POST /api/habits`
#[derive(Debug, Deserialize)]
pub struct CreateHabitRequest {
    pub name: String,
    pub emoji: Option<String>,
}

/// Body for `PUT /api/habits/{id}`
#[derive(Debug, Deserialize)]
pub struct UpdateHabitRequest {
    pub name: String,
    pub emoji: String,
}

/// A habit as returned to the client, enriched with its derived streak
#[derive(Debug, Serialize)]
pub struct HabitResponse {
    pub id: String,
    pub name: String,
    pub emoji: String,
    pub current_streak: u32,
    pub created_at: NaiveDate,
}

impl HabitResponse {
    pub fn from_habit(habit: &Habit, current_streak: u32) -> Self {
        Self {
            id: habit.id.to_string(),
            name: habit.name.clone(),
            emoji: habit.emoji.clone(),
            current_streak,
            created_at: habit.created_at,
        }
    }
}

/// Body for `POST /api/completions`
#[derive(Debug, Deserialize)]
pub struct CreateCompletionRequest {
    pub habit_id: String,
    pub completed_date: NaiveDate,
}

/// A completion as returned to the client
#[derive(Debug, Serialize)]
pub struct CompletionResponse {
    pub id: String,
    pub habit_id: String,
    pub completed_date: NaiveDate,
}

impl CompletionResponse {
    pub fn from_completion(completion: &Completion) -> Self {
        Self {
            id: completion.id.to_string(),
            habit_id: completion.habit_id.to_string(),
            completed_date: completion.completed_date,
        }
    }
}

/// Success message returned by delete endpoints
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Liveness indicator for `GET /api/health`
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
