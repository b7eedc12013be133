/// Completion entity recording that a habit was done on a specific day
///
/// A completion carries no time-of-day component: one row means "this habit
/// was performed on this calendar date". The storage layer guarantees that at
/// most one completion exists per habit and date.

use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use crate::domain::{CompletionId, HabitId};

/// A record of completing a habit on a specific calendar date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    /// Unique identifier for this completion
    pub id: CompletionId,
    /// Which habit this completion belongs to
    pub habit_id: HabitId,
    /// The calendar date the habit was completed
    pub completed_date: NaiveDate,
}

impl Completion {
    /// Create a new completion with a fresh id
    ///
    /// Duplicate and referential checks live in the storage layer, where they
    /// can be enforced atomically against the current database state.
    pub fn new(habit_id: HabitId, completed_date: NaiveDate) -> Self {
        Self {
            id: CompletionId::new(),
            habit_id,
            completed_date,
        }
    }

    /// Create a completion from existing data (used when loading from the database)
    pub fn from_existing(id: CompletionId, habit_id: HabitId, completed_date: NaiveDate) -> Self {
        Self {
            id,
            habit_id,
            completed_date,
        }
    }
}
