/// Basic unit tests to verify core functionality through the public API
use habit_tracker_api::*;
use chrono::{Duration, Utc};
use std::sync::Arc;
use tempfile::NamedTempFile;

fn file_backed_store(path: std::path::PathBuf) -> SqliteStore {
    let store = SqliteStore::open(path).expect("Failed to open store");
    store.run_migrations().expect("Failed to run migrations");
    store
}

#[test]
fn test_store_creation() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let store = SqliteStore::open(temp_file.path().to_path_buf());
    assert!(store.is_ok());
}

#[test]
fn test_storage_interface() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let store = file_backed_store(temp_file.path().to_path_buf());

    // The store is usable through the HabitStore trait object
    let store: &dyn HabitStore = &store;
    assert!(store.list_habits().unwrap().is_empty());
}

#[test]
fn test_database_persistence() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = temp_file.path().to_path_buf();

    let habit = Habit::new("Run".to_string(), None).unwrap();
    {
        let store = file_backed_store(db_path.clone());
        store.create_habit(&habit).unwrap();
    }

    // A second store over the same file sees the committed data
    let store = file_backed_store(db_path);
    let loaded = store.get_habit(&habit.id).unwrap();
    assert_eq!(loaded, habit);
}

#[test]
fn test_streak_from_stored_completions() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let store = file_backed_store(temp_file.path().to_path_buf());
    let today = Utc::now().naive_utc().date();

    let habit = Habit::new("Run".to_string(), None).unwrap();
    store.create_habit(&habit).unwrap();

    // No completions yet
    let dates = store.completion_dates(&habit.id).unwrap();
    assert_eq!(current_streak(&dates, today), 0);

    store
        .create_completion(&Completion::new(habit.id.clone(), today))
        .unwrap();
    store
        .create_completion(&Completion::new(habit.id.clone(), today - Duration::days(1)))
        .unwrap();

    let dates = store.completion_dates(&habit.id).unwrap();
    assert_eq!(current_streak(&dates, today), 2);
}

#[test]
fn test_streak_survives_missing_today() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let store = file_backed_store(temp_file.path().to_path_buf());
    let today = Utc::now().naive_utc().date();

    let habit = Habit::new("Read".to_string(), Some("📚".to_string())).unwrap();
    store.create_habit(&habit).unwrap();

    // Yesterday and the day before, but not today: grace day keeps the run alive
    store
        .create_completion(&Completion::new(habit.id.clone(), today - Duration::days(1)))
        .unwrap();
    store
        .create_completion(&Completion::new(habit.id.clone(), today - Duration::days(2)))
        .unwrap();

    let dates = store.completion_dates(&habit.id).unwrap();
    assert_eq!(current_streak(&dates, today), 2);
}

#[test]
fn test_duplicate_completion_leaves_one_row() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let store = file_backed_store(temp_file.path().to_path_buf());
    let today = Utc::now().naive_utc().date();

    let habit = Habit::new("Run".to_string(), None).unwrap();
    store.create_habit(&habit).unwrap();

    store
        .create_completion(&Completion::new(habit.id.clone(), today))
        .unwrap();
    let second = store.create_completion(&Completion::new(habit.id.clone(), today));

    assert!(matches!(
        second,
        Err(StorageError::DuplicateCompletion { .. })
    ));
    assert_eq!(store.list_completions().unwrap().len(), 1);
}

#[test]
fn test_concurrent_duplicate_attempts_one_success() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let store = Arc::new(file_backed_store(temp_file.path().to_path_buf()));
    let today = Utc::now().naive_utc().date();

    let habit = Habit::new("Run".to_string(), None).unwrap();
    store.create_habit(&habit).unwrap();

    // Several threads race to record the same habit/date pair
    let mut handles = Vec::new();
    for _ in 0..8 {
        let store = Arc::clone(&store);
        let habit_id = habit.id.clone();
        handles.push(std::thread::spawn(move || {
            store
                .create_completion(&Completion::new(habit_id, today))
                .is_ok()
        }));
    }

    let successes = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();

    assert_eq!(successes, 1);
    assert_eq!(store.list_completions().unwrap().len(), 1);
}

#[test]
fn test_cascade_delete_removes_completions() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let store = file_backed_store(temp_file.path().to_path_buf());
    let today = Utc::now().naive_utc().date();

    let habit = Habit::new("Run".to_string(), None).unwrap();
    store.create_habit(&habit).unwrap();
    for offset in 0..5 {
        store
            .create_completion(&Completion::new(
                habit.id.clone(),
                today - Duration::days(offset),
            ))
            .unwrap();
    }

    store.delete_habit(&habit.id).unwrap();
    assert!(store.list_completions().unwrap().is_empty());
}
