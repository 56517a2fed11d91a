// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User and exercise-log operations.

use crate::dates;
use crate::db::{self, LogStore};
use crate::error::{AppError, Result};
use crate::models::{Exercise, ExerciseRecord, User, UserSummary};
use crate::services::LogFilter;

/// Operations over users and their embedded exercise logs.
#[derive(Clone)]
pub struct UserLogService {
    store: LogStore,
}

impl UserLogService {
    pub fn new(store: LogStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &LogStore {
        &self.store
    }

    /// Register a user with an empty log. Usernames need not be unique.
    pub async fn create_user(&self, username: &str) -> Result<UserSummary> {
        let user = User::new(db::new_document_id()?, username.to_string());
        self.store.insert_user(&user).await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User created");
        Ok(user.summary())
    }

    /// All users, projected to ID and name.
    pub async fn list_users(&self) -> Result<Vec<UserSummary>> {
        self.store.list_users().await?.ok_or(AppError::NotFound)
    }

    /// Append an exercise to a user's log.
    ///
    /// `date` is stored as given (callers substitute today's date for an empty
    /// one); the returned record carries it in canonical form.
    pub async fn create_exercise(
        &self,
        id: &str,
        description: &str,
        duration: i64,
        date: &str,
    ) -> Result<ExerciseRecord> {
        let exercise = Exercise {
            description: description.to_string(),
            duration,
            date: date.to_string(),
        };

        let user = self
            .store
            .append_exercise(id, &exercise)
            .await?
            .ok_or(AppError::NotFound)?;

        tracing::info!(user_id = id, count = user.count, "Exercise logged");

        Ok(ExerciseRecord {
            id: user.id,
            username: user.username,
            date: dates::canonicalize(&exercise.date),
            duration: exercise.duration,
            description: exercise.description,
        })
    }

    /// Fetch a user with the log filtered by `filter`.
    ///
    /// Filtering only affects the returned copy; `count` stays the all-time
    /// total even when entries are filtered out.
    pub async fn get_user_log(&self, id: &str, filter: &LogFilter) -> Result<User> {
        let mut user = self.store.get_user(id).await?.ok_or(AppError::NotFound)?;

        user.log = filter.apply(std::mem::take(&mut user.log));

        tracing::debug!(
            user_id = id,
            count = user.count,
            returned = user.log.len(),
            "User log fetched"
        );
        Ok(user)
    }
}
