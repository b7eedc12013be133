/// Habit entity and related functionality
///
/// This module defines the core Habit struct that represents a recurring
/// activity the user wants to track, along with its validation rules.

use serde::{Deserialize, Serialize};
use chrono::{NaiveDate, Utc};
use crate::domain::{DomainError, HabitId};

/// Emoji used when the client does not supply one
pub const DEFAULT_EMOJI: &str = "⭐";

/// A habit represents something the user wants to do regularly
///
/// Each habit has a display name, an emoji shown next to it in the client,
/// and the date it was created. The current streak is never part of the
/// record: it is derived from the habit's completions at read time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    /// Unique identifier for this habit
    pub id: HabitId,
    /// Display name (e.g., "Morning Run")
    pub name: String,
    /// Short display glyph shown next to the name
    pub emoji: String,
    /// Calendar date this habit was created; immutable afterwards
    pub created_at: NaiveDate,
}

impl Habit {
    /// Create a new habit with validation
    ///
    /// Assigns a fresh id, defaults the emoji when none is given, and stamps
    /// `created_at` with the current date.
    pub fn new(name: String, emoji: Option<String>) -> Result<Self, DomainError> {
        Self::validate_name(&name)?;

        let emoji = emoji.unwrap_or_else(|| DEFAULT_EMOJI.to_string());
        Self::validate_emoji(&emoji)?;

        Ok(Self {
            id: HabitId::new(),
            name,
            emoji,
            created_at: Utc::now().naive_utc().date(),
        })
    }

    /// Create a habit from existing data (used when loading from the database)
    ///
    /// This constructor assumes data is already validated and is mainly used
    /// by the storage layer.
    pub fn from_existing(id: HabitId, name: String, emoji: String, created_at: NaiveDate) -> Self {
        Self {
            id,
            name,
            emoji,
            created_at,
        }
    }

    /// Overwrite the habit's name and emoji with validation
    ///
    /// `id` and `created_at` are immutable; this is the only in-place update
    /// the system supports.
    pub fn rename(&mut self, name: String, emoji: String) -> Result<(), DomainError> {
        Self::validate_name(&name)?;
        Self::validate_emoji(&emoji)?;

        self.name = name;
        self.emoji = emoji;
        Ok(())
    }

    // Validation helper methods

    /// Validate habit name according to business rules
    fn validate_name(name: &str) -> Result<(), DomainError> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be empty".to_string(),
            ));
        }

        if trimmed.len() > 100 {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be longer than 100 characters".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate the emoji glyph
    fn validate_emoji(emoji: &str) -> Result<(), DomainError> {
        if emoji.trim().is_empty() {
            return Err(DomainError::Validation {
                message: "Emoji cannot be empty if specified".to_string(),
            });
        }

        if emoji.len() > 16 {
            return Err(DomainError::Validation {
                message: "Emoji cannot be longer than 16 bytes".to_string(),
            });
        }

        Ok(())
    }
}
