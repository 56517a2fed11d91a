// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Logging exercises through the HTTP API.

use axum::http::StatusCode;
use exercise_tracker::dates;
use serde_json::json;

mod common;
use common::{create_test_app, get, post_form, post_json, send};

#[tokio::test]
async fn test_exercise_response_has_canonical_date() {
    let (app, _state) = create_test_app();
    let id = common::create_user(&app, "alice").await;

    let body = common::add_exercise(&app, &id, "description=run&duration=30&date=2023-01-15").await;

    assert_eq!(
        body,
        json!({
            "_id": id,
            "username": "alice",
            "date": "Sun Jan 15 2023",
            "duration": 30,
            "description": "run",
        })
    );
}

#[tokio::test]
async fn test_missing_date_uses_today() {
    let (app, _state) = create_test_app();
    let id = common::create_user(&app, "alice").await;

    let body = common::add_exercise(&app, &id, "description=swim&duration=20&date=").await;
    assert_eq!(body["date"], dates::today());

    let body = common::add_exercise(&app, &id, "description=swim&duration=20").await;
    assert_eq!(body["date"], dates::today());
}

#[tokio::test]
async fn test_duration_is_coerced_to_integer() {
    let (app, _state) = create_test_app();
    let id = common::create_user(&app, "alice").await;

    let body =
        common::add_exercise(&app, &id, "description=row&duration=%2045.9%20&date=2023-01-15").await;
    assert_eq!(body["duration"], 45);

    let (status, body) = send(
        &app,
        post_json(
            &format!("/api/users/{}/exercises", id),
            json!({ "description": "lift", "duration": 15, "date": "2023-01-16" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["duration"], 15);
    assert_eq!(body["date"], "Mon Jan 16 2023");
}

#[tokio::test]
async fn test_non_numeric_duration_is_rejected() {
    let (app, _state) = create_test_app();
    let id = common::create_user(&app, "alice").await;

    for form in ["description=run&duration=thirty", "description=run"] {
        let (status, body) = send(
            &app,
            post_form(&format!("/api/users/{}/exercises", id), form),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    // Nothing was logged.
    let (_, user) = send(&app, get(&format!("/api/users/{}/logs", id))).await;
    assert_eq!(user["count"], 0);
}

#[tokio::test]
async fn test_unparseable_date_is_stored_but_rendered_invalid() {
    let (app, _state) = create_test_app();
    let id = common::create_user(&app, "alice").await;

    let body = common::add_exercise(&app, &id, "description=run&duration=5&date=someday").await;
    assert_eq!(body["date"], dates::INVALID_DATE);

    let (_, user) = send(&app, get(&format!("/api/users/{}/logs", id))).await;
    assert_eq!(user["log"][0]["date"], "someday");
}

#[tokio::test]
async fn test_exercise_for_unknown_user_is_no_data() {
    let (app, _state) = create_test_app();

    let (status, body) = send(
        &app,
        post_form(
            "/api/users/000000000000000000000000/exercises",
            "description=run&duration=30",
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "no data" }));

    let (_, users) = send(&app, get("/api/users")).await;
    assert_eq!(users, json!([]));
}

#[tokio::test]
async fn test_count_tracks_every_exercise() {
    let (app, _state) = create_test_app();
    let id = common::create_user(&app, "alice").await;

    for day in 1..=7 {
        common::add_exercise(
            &app,
            &id,
            &format!("description=day{}&duration={}&date=2023-03-0{}", day, day * 10, day),
        )
        .await;
    }

    let (_, user) = send(&app, get(&format!("/api/users/{}/logs", id))).await;
    assert_eq!(user["count"], 7);
    assert_eq!(user["log"].as_array().unwrap().len(), 7);
}
