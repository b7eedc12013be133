/// SQLite implementation of the habit storage interface
///
/// This module provides the concrete SQLite implementation for storing and
/// retrieving habit data. The connection is guarded by a mutex so that each
/// store operation runs start-to-finish against the database; combined with
/// per-operation transactions this gives createCompletion its
/// check-then-insert atomicity.

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{Completion, CompletionId, Habit, HabitId};
use crate::storage::{migrations, HabitStore, StorageError};

/// SQLite-based storage implementation
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open the database file
    ///
    /// Schema creation is a separate explicit step: call `run_migrations`
    /// once after opening.
    pub fn open(db_path: PathBuf) -> Result<Self, StorageError> {
        let conn = Connection::open(&db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        Self::configure(&conn)?;

        tracing::info!("SQLite store opened at: {:?}", db_path);

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (used by tests)
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        Self::configure(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Apply any outstanding schema migrations
    pub fn run_migrations(&self) -> Result<(), StorageError> {
        let conn = self.conn()?;
        migrations::apply(&conn)
    }

    fn configure(conn: &Connection) -> Result<(), StorageError> {
        conn.execute("PRAGMA foreign_keys = ON", [])
            .map_err(|e| StorageError::Connection(format!("Failed to enable foreign keys: {}", e)))?;
        Ok(())
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn
            .lock()
            .map_err(|_| StorageError::Connection("Database connection lock poisoned".to_string()))
    }

    fn read_habit_row(row: &rusqlite::Row<'_>) -> Result<Habit, rusqlite::Error> {
        let id_str: String = row.get(0)?;
        let id = HabitId::from_string(&id_str).map_err(|_| {
            rusqlite::Error::InvalidColumnType(0, "Invalid UUID".to_string(), rusqlite::types::Type::Text)
        })?;

        Ok(Habit::from_existing(
            id,
            row.get(1)?, // name
            row.get(2)?, // emoji
            row.get(3)?, // created_at
        ))
    }

    fn read_completion_row(row: &rusqlite::Row<'_>) -> Result<Completion, rusqlite::Error> {
        let id_str: String = row.get(0)?;
        let id = CompletionId::from_string(&id_str).map_err(|_| {
            rusqlite::Error::InvalidColumnType(0, "Invalid UUID".to_string(), rusqlite::types::Type::Text)
        })?;

        let habit_id_str: String = row.get(1)?;
        let habit_id = HabitId::from_string(&habit_id_str).map_err(|_| {
            rusqlite::Error::InvalidColumnType(1, "Invalid UUID".to_string(), rusqlite::types::Type::Text)
        })?;

        Ok(Completion::from_existing(id, habit_id, row.get(2)?))
    }
}

impl HabitStore for SqliteStore {
    /// List all habits, newest first
    fn list_habits(&self) -> Result<Vec<Habit>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, emoji, created_at FROM habits ORDER BY created_at DESC, id",
        )?;

        let habit_iter = stmt.query_map([], |row| Self::read_habit_row(row))?;

        let mut habits = Vec::new();
        for habit in habit_iter {
            habits.push(habit?);
        }

        Ok(habits)
    }

    /// Get a habit by its ID
    fn get_habit(&self, habit_id: &HabitId) -> Result<Habit, StorageError> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT id, name, emoji, created_at FROM habits WHERE id = ?1")?;

        let result = stmt.query_row(params![habit_id.to_string()], |row| Self::read_habit_row(row));

        match result {
            Ok(habit) => Ok(habit),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(StorageError::HabitNotFound {
                habit_id: habit_id.to_string(),
            }),
            Err(e) => Err(StorageError::Query(e)),
        }
    }

    /// Create a new habit in the database
    fn create_habit(&self, habit: &Habit) -> Result<(), StorageError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO habits (id, name, emoji, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                habit.id.to_string(),
                habit.name,
                habit.emoji,
                habit.created_at
            ],
        )?;

        tracing::debug!("Created habit: {} ({})", habit.name, habit.id.to_string());
        Ok(())
    }

    /// Overwrite an existing habit's name and emoji
    fn update_habit(&self, habit: &Habit) -> Result<(), StorageError> {
        let conn = self.conn()?;
        let rows_affected = conn.execute(
            "UPDATE habits SET name = ?2, emoji = ?3 WHERE id = ?1",
            params![habit.id.to_string(), habit.name, habit.emoji],
        )?;

        if rows_affected == 0 {
            return Err(StorageError::HabitNotFound {
                habit_id: habit.id.to_string(),
            });
        }

        tracing::debug!("Updated habit: {} ({})", habit.name, habit.id.to_string());
        Ok(())
    }

    /// Delete a habit and all of its completions in one transaction
    fn delete_habit(&self, habit_id: &HabitId) -> Result<(), StorageError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        tx.execute(
            "DELETE FROM completions WHERE habit_id = ?1",
            params![habit_id.to_string()],
        )?;

        let rows_affected = tx.execute(
            "DELETE FROM habits WHERE id = ?1",
            params![habit_id.to_string()],
        )?;

        if rows_affected == 0 {
            // Dropping the transaction rolls the completion delete back.
            return Err(StorageError::HabitNotFound {
                habit_id: habit_id.to_string(),
            });
        }

        tx.commit()?;

        tracing::debug!("Deleted habit and its completions: {}", habit_id.to_string());
        Ok(())
    }

    /// List all completions across all habits
    fn list_completions(&self) -> Result<Vec<Completion>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, habit_id, completed_date FROM completions
             ORDER BY completed_date DESC, id",
        )?;

        let completion_iter = stmt.query_map([], |row| Self::read_completion_row(row))?;

        let mut completions = Vec::new();
        for completion in completion_iter {
            completions.push(completion?);
        }

        Ok(completions)
    }

    /// Insert a completion, enforcing the referential and uniqueness invariants
    fn create_completion(&self, completion: &Completion) -> Result<(), StorageError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let habit_exists: Option<i64> = tx
            .query_row(
                "SELECT 1 FROM habits WHERE id = ?1",
                params![completion.habit_id.to_string()],
                |row| row.get(0),
            )
            .optional()?;

        if habit_exists.is_none() {
            return Err(StorageError::HabitNotFound {
                habit_id: completion.habit_id.to_string(),
            });
        }

        let duplicate: Option<i64> = tx
            .query_row(
                "SELECT 1 FROM completions WHERE habit_id = ?1 AND completed_date = ?2",
                params![completion.habit_id.to_string(), completion.completed_date],
                |row| row.get(0),
            )
            .optional()?;

        if duplicate.is_some() {
            return Err(StorageError::DuplicateCompletion {
                habit_id: completion.habit_id.to_string(),
                date: completion.completed_date.to_string(),
            });
        }

        let insert = tx.execute(
            "INSERT INTO completions (id, habit_id, completed_date) VALUES (?1, ?2, ?3)",
            params![
                completion.id.to_string(),
                completion.habit_id.to_string(),
                completion.completed_date
            ],
        );

        match insert {
            Ok(_) => {}
            // The unique index backstops writers outside this process.
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                return Err(StorageError::DuplicateCompletion {
                    habit_id: completion.habit_id.to_string(),
                    date: completion.completed_date.to_string(),
                });
            }
            Err(e) => return Err(StorageError::Query(e)),
        }

        tx.commit()?;

        tracing::debug!(
            "Created completion: {} for habit {} on {}",
            completion.id.to_string(),
            completion.habit_id.to_string(),
            completion.completed_date
        );
        Ok(())
    }

    /// Delete a completion by its ID
    fn delete_completion(&self, completion_id: &CompletionId) -> Result<(), StorageError> {
        let conn = self.conn()?;
        let rows_affected = conn.execute(
            "DELETE FROM completions WHERE id = ?1",
            params![completion_id.to_string()],
        )?;

        if rows_affected == 0 {
            return Err(StorageError::CompletionNotFound {
                completion_id: completion_id.to_string(),
            });
        }

        tracing::debug!("Deleted completion: {}", completion_id.to_string());
        Ok(())
    }

    /// All completion dates recorded for one habit, newest first
    fn completion_dates(&self, habit_id: &HabitId) -> Result<Vec<NaiveDate>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT completed_date FROM completions WHERE habit_id = ?1
             ORDER BY completed_date DESC",
        )?;

        let date_iter = stmt.query_map(params![habit_id.to_string()], |row| {
            row.get::<_, NaiveDate>(0)
        })?;

        let mut dates = Vec::new();
        for date in date_iter {
            dates.push(date?);
        }

        Ok(dates)
    }
}
