// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations on the `users` collection.
//!
//! Each user is one document keyed by its `_id`, with the exercise log
//! embedded as an array field.

use crate::db::collections;
use crate::error::AppError;
use crate::models::{Exercise, User, UserSummary};
use firestore::FirestoreConsistencySelector;
use futures_util::TryStreamExt;

/// Attempts at the append transaction before giving up on contention.
const MAX_TRANSACTION_ATTEMPTS: u32 = 5;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // The emulator accepts any token, so skip credential discovery.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a disconnected client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    /// Store a new user document.
    pub async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&user.id)
            .object(user)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::debug!(user_id = %user.id, "User document written");
        Ok(())
    }

    /// List every user, reading only the ID and name fields.
    pub async fn list_users(&self) -> Result<Vec<UserSummary>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .fields(["_id", "username"])
            .from(collections::USERS)
            .obj::<UserSummary>()
            .stream_query_with_errors()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a user by ID.
    pub async fn get_user(&self, id: &str) -> Result<Option<User>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Append an exercise to a user's log and increment the count.
    ///
    /// The read happens inside the transaction, so a concurrent append to the
    /// same user makes this commit fail rather than overwrite it; the whole
    /// read-modify-write is then retried with fresh data.
    pub async fn append_exercise(
        &self,
        id: &str,
        exercise: &Exercise,
    ) -> Result<Option<User>, AppError> {
        let client = self.get_client()?;
        let mut last_error = String::new();

        for attempt in 1..=MAX_TRANSACTION_ATTEMPTS {
            let mut transaction = client
                .begin_transaction()
                .await
                .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

            let transaction_db = client.clone_with_consistency_selector(
                FirestoreConsistencySelector::Transaction(transaction.transaction_id().clone()),
            );

            let current: Option<User> = transaction_db
                .fluent()
                .select()
                .by_id_in(collections::USERS)
                .obj()
                .one(id)
                .await
                .map_err(|e| {
                    AppError::Database(format!("Failed to read user in transaction: {}", e))
                })?;

            let Some(mut user) = current else {
                let _ = transaction.rollback().await;
                return Ok(None);
            };

            user.push_exercise(exercise.clone());

            client
                .fluent()
                .update()
                .in_col(collections::USERS)
                .document_id(id)
                .object(&user)
                .add_to_transaction(&mut transaction)
                .map_err(|e| {
                    AppError::Database(format!("Failed to add user to transaction: {}", e))
                })?;

            match transaction.commit().await {
                Ok(_) => {
                    tracing::debug!(
                        user_id = id,
                        count = user.count,
                        attempt,
                        "Exercise appended"
                    );
                    return Ok(Some(user));
                }
                Err(e) => {
                    tracing::warn!(
                        user_id = id,
                        attempt,
                        error = %e,
                        "Append transaction failed"
                    );
                    last_error = e.to_string();
                }
            }
        }

        Err(AppError::Database(format!(
            "Transaction commit failed after {} attempts: {}",
            MAX_TRANSACTION_ATTEMPTS, last_error
        )))
    }

    /// Drop the connection.
    pub fn close(self) {
        if self.client.is_some() {
            tracing::info!("Firestore connection closed");
        }
    }
}
