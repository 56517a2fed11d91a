// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for users and their exercise logs.

use crate::coerce::Numeric;
use crate::dates;
use crate::error::{AppError, Result};
use crate::models::{ExerciseRecord, User, UserSummary};
use crate::routes::extract::{ApiPath, FormOrJson};
use crate::services::LogFilter;
use crate::AppState;
use axum::{
    extract::{RawQuery, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/users/{id}/logs", get(get_user_log))
        .route("/api/users/{id}/exercises", post(create_exercise))
}

// ─── Users ───────────────────────────────────────────────────

#[derive(Deserialize)]
struct CreateUserRequest {
    #[serde(default)]
    username: String,
}

async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<UserSummary>>> {
    Ok(Json(state.user_log.list_users().await?))
}

async fn create_user(
    State(state): State<Arc<AppState>>,
    FormOrJson(request): FormOrJson<CreateUserRequest>,
) -> Result<Json<UserSummary>> {
    Ok(Json(state.user_log.create_user(&request.username).await?))
}

// ─── Exercises ───────────────────────────────────────────────

#[derive(Deserialize)]
struct CreateExerciseRequest {
    #[serde(default)]
    description: String,
    duration: Option<Numeric>,
    /// Defaults to today when missing or empty
    date: Option<String>,
}

async fn create_exercise(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<String>,
    FormOrJson(request): FormOrJson<CreateExerciseRequest>,
) -> Result<Json<ExerciseRecord>> {
    let duration = request
        .duration
        .as_ref()
        .and_then(Numeric::to_integer)
        .ok_or_else(|| AppError::BadRequest("duration must be a number".to_string()))?;

    let date = request
        .date
        .filter(|date| !date.is_empty())
        .unwrap_or_else(dates::today);

    tracing::debug!(user_id = %id, duration, date = %date, "Logging exercise");

    let record = state
        .user_log
        .create_exercise(&id, &request.description, duration, &date)
        .await?;
    Ok(Json(record))
}

// ─── Logs ────────────────────────────────────────────────────

async fn get_user_log(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<String>,
    RawQuery(query): RawQuery,
) -> Result<Json<User>> {
    let filter = LogFilter::from_query(query.as_deref().unwrap_or_default());

    tracing::debug!(
        user_id = %id,
        from = ?filter.from,
        to = ?filter.to,
        limit = ?filter.limit,
        "Fetching user log"
    );

    Ok(Json(state.user_log.get_user_log(&id, &filter).await?))
}
