// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use exercise_tracker::config::Config;
use exercise_tracker::db::{FirestoreDb, LogStore};
use exercise_tracker::routes::create_router;
use exercise_tracker::services::UserLogService;
use exercise_tracker::AppState;
use std::sync::Arc;
use tower::ServiceExt;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a test app over a fresh in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with_store(LogStore::memory())
}

#[allow(dead_code)]
pub fn create_test_app_with_store(store: LogStore) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState {
        config: Config::test_default(),
        user_log: UserLogService::new(store),
    });

    (create_router(state.clone()), state)
}

/// Send a request and decode the JSON response body.
#[allow(dead_code)]
pub async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, body)
}

#[allow(dead_code)]
pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[allow(dead_code)]
pub fn post_form(uri: &str, form: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap()
}

#[allow(dead_code)]
pub fn post_json(uri: &str, json: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json.to_string()))
        .unwrap()
}

/// Create a user through the API and return its ID.
#[allow(dead_code)]
pub async fn create_user(app: &axum::Router, username: &str) -> String {
    let (status, body) = send(app, post_form("/api/users", &format!("username={}", username))).await;
    assert_eq!(status, StatusCode::OK);
    body["_id"].as_str().unwrap().to_string()
}

/// Log an exercise through the API.
#[allow(dead_code)]
pub async fn add_exercise(app: &axum::Router, id: &str, form: &str) -> serde_json::Value {
    let (status, body) = send(app, post_form(&format!("/api/users/{}/exercises", id), form)).await;
    assert_eq!(status, StatusCode::OK, "unexpected response: {}", body);
    body
}
