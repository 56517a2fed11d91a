// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer: the user collection behind a single store handle.
//!
//! [`LogStore`] is constructed once at startup, shared through `AppState`,
//! and closed after the server stops. Firestore is the persistent backend;
//! the in-memory backend serves local runs and offline tests.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryDb;

use crate::config::Config;
use crate::error::AppError;
use crate::models::{Exercise, User, UserSummary};
use ring::rand::{SecureRandom, SystemRandom};

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
}

/// Bytes of randomness in a generated document ID (24 hex characters).
const DOCUMENT_ID_BYTES: usize = 12;

/// Generate a new opaque document ID.
pub fn new_document_id() -> Result<String, AppError> {
    let mut bytes = [0u8; DOCUMENT_ID_BYTES];
    SystemRandom::new()
        .fill(&mut bytes)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to generate document ID")))?;
    Ok(hex::encode(bytes))
}

/// Handle to the user collection.
#[derive(Clone)]
pub enum LogStore {
    Firestore(FirestoreDb),
    Memory(MemoryDb),
}

impl LogStore {
    /// Open the store selected by the configuration.
    ///
    /// Uses Firestore when a GCP project is configured, otherwise an
    /// in-memory store whose contents are lost on exit.
    pub async fn open(config: &Config) -> Result<Self, AppError> {
        match &config.gcp_project_id {
            Some(project_id) => Ok(Self::Firestore(FirestoreDb::new(project_id).await?)),
            None => {
                tracing::warn!("GCP_PROJECT_ID not set, using in-memory store");
                Ok(Self::memory())
            }
        }
    }

    /// An empty in-memory store.
    pub fn memory() -> Self {
        Self::Memory(MemoryDb::new())
    }

    /// Persist a new user.
    pub async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        match self {
            Self::Firestore(db) => db.insert_user(user).await,
            Self::Memory(db) => db.insert_user(user),
        }
    }

    /// All users, projected to ID and name.
    ///
    /// `None` means the collection itself is unavailable, which is distinct
    /// from an empty collection.
    pub async fn list_users(&self) -> Result<Option<Vec<UserSummary>>, AppError> {
        match self {
            Self::Firestore(db) => db.list_users().await.map(Some),
            Self::Memory(db) => Ok(db.list_users()),
        }
    }

    /// Fetch a user with the full log.
    pub async fn get_user(&self, id: &str) -> Result<Option<User>, AppError> {
        match self {
            Self::Firestore(db) => db.get_user(id).await,
            Self::Memory(db) => db.get_user(id),
        }
    }

    /// Atomically append an exercise and increment the user's count.
    ///
    /// Returns the updated user, or `None` if no user has this ID.
    pub async fn append_exercise(
        &self,
        id: &str,
        exercise: &Exercise,
    ) -> Result<Option<User>, AppError> {
        match self {
            Self::Firestore(db) => db.append_exercise(id, exercise).await,
            Self::Memory(db) => db.append_exercise(id, exercise),
        }
    }

    /// Release the store at shutdown.
    pub async fn close(self) {
        match self {
            Self::Firestore(db) => db.close(),
            Self::Memory(db) => db.close(),
        }
    }
}
