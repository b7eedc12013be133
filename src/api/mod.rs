//! HTTP boundary for the habit tracker.
//!
//! Builds the axum router over an explicitly constructed store instance.
//! Handlers receive the store through `AppState` and bridge to its
//! synchronous operations on the blocking pool.

pub mod blocking;
pub mod error;
pub mod handlers;
pub mod types;

use std::sync::Arc;

use axum::routing::{delete, get, put};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::api::types::HealthResponse;
use crate::storage::SqliteStore;

/// Shared application state for all HTTP handlers.
pub struct AppState {
    /// The durable store; the only component that mutates persisted data.
    pub store: Arc<SqliteStore>,
}

/// Build the application router with all routes and middleware attached.
pub fn create_router(state: Arc<AppState>) -> Router {
    // The front end is served from another origin, so every route carries a
    // permissive CORS layer.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health))
        .route(
            "/api/habits",
            get(handlers::habits::list_habits).post(handlers::habits::create_habit),
        )
        .route(
            "/api/habits/{id}",
            put(handlers::habits::update_habit).delete(handlers::habits::delete_habit),
        )
        .route(
            "/api/completions",
            get(handlers::completions::list_completions)
                .post(handlers::completions::create_completion),
        )
        .route(
            "/api/completions/{id}",
            delete(handlers::completions::delete_completion),
        )
        .layer(cors)
        .with_state(state)
}

/// `GET /api/health` — liveness indicator with no data dependency
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}
