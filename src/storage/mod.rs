/// Storage layer for persisting habit data
///
/// This module handles all database operations using SQLite. It provides
/// a clean interface for storing and retrieving habits and completions while
/// enforcing the uniqueness and referential-integrity invariants.

pub mod sqlite;
pub mod migrations;

// Re-export the main storage types
pub use sqlite::*;

use thiserror::Error;
use chrono::NaiveDate;
use crate::domain::{Completion, CompletionId, Habit, HabitId};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Habit not found: {habit_id}")]
    HabitNotFound { habit_id: String },

    #[error("Completion not found: {completion_id}")]
    CompletionNotFound { completion_id: String },

    #[error("Duplicate completion: habit {habit_id} already logged for date {date}")]
    DuplicateCompletion { habit_id: String, date: String },

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Trait defining the storage interface for habits and completions
///
/// This trait allows us to potentially swap out SQLite for other databases
/// while keeping the same interface, and lets tests construct independent
/// store instances.
pub trait HabitStore {
    /// List all habits
    fn list_habits(&self) -> Result<Vec<Habit>, StorageError>;

    /// Get a habit by ID
    fn get_habit(&self, habit_id: &HabitId) -> Result<Habit, StorageError>;

    /// Create a new habit
    fn create_habit(&self, habit: &Habit) -> Result<(), StorageError>;

    /// Update an existing habit's name and emoji
    fn update_habit(&self, habit: &Habit) -> Result<(), StorageError>;

    /// Delete a habit and all of its completions as one atomic operation
    fn delete_habit(&self, habit_id: &HabitId) -> Result<(), StorageError>;

    /// List all completions across all habits
    fn list_completions(&self) -> Result<Vec<Completion>, StorageError>;

    /// Create a new completion
    ///
    /// Fails with `HabitNotFound` when the referenced habit does not exist
    /// and `DuplicateCompletion` when the `(habit_id, completed_date)` pair
    /// is already recorded. Both checks and the insert are atomic with
    /// respect to concurrent callers.
    fn create_completion(&self, completion: &Completion) -> Result<(), StorageError>;

    /// Delete a completion by ID
    fn delete_completion(&self, completion_id: &CompletionId) -> Result<(), StorageError>;

    /// All completion dates recorded for one habit
    fn completion_dates(&self, habit_id: &HabitId) -> Result<Vec<NaiveDate>, StorageError>;
}
