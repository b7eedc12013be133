/// Basic integration tests driving the HTTP API in-process
///
/// Each test builds a router over its own in-memory store and sends requests
/// through `tower::ServiceExt::oneshot`, so tests are fully isolated and need
/// no running server.
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use habit_tracker_api::{create_router, AppState, SqliteStore};

fn test_router() -> Router {
    let store = SqliteStore::open_in_memory().expect("Failed to open store");
    store.run_migrations().expect("Failed to run migrations");
    create_router(Arc::new(AppState {
        store: Arc::new(store),
    }))
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_health_check() {
    let router = test_router();
    let (status, body) = send(&router, "GET", "/api/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_create_and_list_habits() {
    let router = test_router();

    let (status, created) = send(
        &router,
        "POST",
        "/api/habits",
        Some(json!({"name": "Run", "emoji": "🏃"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["name"], "Run");
    assert_eq!(created["emoji"], "🏃");
    assert_eq!(created["current_streak"], 0);

    let (status, habits) = send(&router, "GET", "/api/habits", None).await;
    assert_eq!(status, StatusCode::OK);
    let habits = habits.as_array().unwrap();
    assert_eq!(habits.len(), 1);
    assert_eq!(habits[0]["id"], created["id"]);
}

#[tokio::test]
async fn test_create_habit_defaults_emoji() {
    let router = test_router();

    let (status, created) =
        send(&router, "POST", "/api/habits", Some(json!({"name": "Read"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["emoji"], "⭐");
}

#[tokio::test]
async fn test_create_habit_rejects_empty_name() {
    let router = test_router();

    let (status, body) =
        send(&router, "POST", "/api/habits", Some(json!({"name": "   "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    // Nothing was stored
    let (_, habits) = send(&router, "GET", "/api/habits", None).await;
    assert!(habits.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_update_habit() {
    let router = test_router();

    let (_, created) = send(
        &router,
        "POST",
        "/api/habits",
        Some(json!({"name": "Run"})),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let (status, updated) = send(
        &router,
        "PUT",
        &format!("/api/habits/{}", id),
        Some(json!({"name": "Run Far", "emoji": "🏃"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Run Far");
    assert_eq!(updated["emoji"], "🏃");
    assert_eq!(updated["created_at"], created["created_at"]);
}

#[tokio::test]
async fn test_update_missing_habit_is_404() {
    let router = test_router();

    let (status, _) = send(
        &router,
        "PUT",
        &format!("/api/habits/{}", uuid::Uuid::new_v4()),
        Some(json!({"name": "Ghost", "emoji": "👻"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_habit_is_404() {
    let router = test_router();

    let (status, _) = send(
        &router,
        "DELETE",
        &format!("/api/habits/{}", uuid::Uuid::new_v4()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_completion_for_missing_habit_is_404() {
    let router = test_router();
    let today = Utc::now().naive_utc().date();

    let (status, _) = send(
        &router,
        "POST",
        "/api/completions",
        Some(json!({
            "habit_id": uuid::Uuid::new_v4().to_string(),
            "completed_date": today.to_string(),
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, completions) = send(&router, "GET", "/api/completions", None).await;
    assert!(completions.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_completion_is_400() {
    let router = test_router();
    let today = Utc::now().naive_utc().date();

    let (_, habit) = send(&router, "POST", "/api/habits", Some(json!({"name": "Run"}))).await;
    let body = json!({
        "habit_id": habit["id"],
        "completed_date": today.to_string(),
    });

    let (status, _) = send(&router, "POST", "/api/completions", Some(body.clone())).await;
    assert_eq!(status, StatusCode::OK);

    let (status, error) = send(&router, "POST", "/api/completions", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["error"].is_string());

    // Exactly one row survives
    let (_, completions) = send(&router, "GET", "/api/completions", None).await;
    assert_eq!(completions.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_missing_completion_is_404() {
    let router = test_router();

    let (status, _) = send(
        &router,
        "DELETE",
        &format!("/api/completions/{}", uuid::Uuid::new_v4()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// End-to-end scenario: streaks follow completions as they come and go.
///
/// Create habit "Run", log today and yesterday (streak 2), delete today's
/// completion (grace day keeps the streak at 1), then delete the habit and
/// verify no completions survive it.
#[tokio::test]
async fn test_streak_end_to_end() {
    let router = test_router();
    let today = Utc::now().naive_utc().date();
    let yesterday = today - Duration::days(1);

    let (_, habit) = send(&router, "POST", "/api/habits", Some(json!({"name": "Run"}))).await;
    let habit_id = habit["id"].as_str().unwrap().to_string();

    let (status, today_completion) = send(
        &router,
        "POST",
        "/api/completions",
        Some(json!({"habit_id": habit_id, "completed_date": today.to_string()})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &router,
        "POST",
        "/api/completions",
        Some(json!({"habit_id": habit_id, "completed_date": yesterday.to_string()})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, habits) = send(&router, "GET", "/api/habits", None).await;
    assert_eq!(habits[0]["current_streak"], 2);

    // Remove today's completion: the grace day now covers today and the
    // back-run stops after yesterday.
    let completion_id = today_completion["id"].as_str().unwrap();
    let (status, message) = send(
        &router,
        "DELETE",
        &format!("/api/completions/{}", completion_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(message["message"], "Completion deleted successfully");

    let (_, habits) = send(&router, "GET", "/api/habits", None).await;
    assert_eq!(habits[0]["current_streak"], 1);

    // Deleting the habit cascades to its completions
    let (status, message) = send(
        &router,
        "DELETE",
        &format!("/api/habits/{}", habit_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(message["message"], "Habit deleted successfully");

    let (_, completions) = send(&router, "GET", "/api/completions", None).await;
    assert!(completions
        .as_array()
        .unwrap()
        .iter()
        .all(|c| c["habit_id"] != habit_id));
    assert!(completions.as_array().unwrap().is_empty());
}
