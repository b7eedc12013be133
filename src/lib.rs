/// Public library interface for the habit tracker API server
///
/// This crate stores habits and their daily completions in SQLite and serves
/// them over an HTTP API, deriving each habit's current streak at read time.
/// The library exports the router constructor, the application state, and the
/// domain and storage types so tests can drive the system in-process.

pub mod api;
pub mod domain;
pub mod storage;

// Re-export the types most callers need
pub use api::{create_router, AppState};
pub use domain::*;
pub use storage::{HabitStore, SqliteStore, StorageError};
