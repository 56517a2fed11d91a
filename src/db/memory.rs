// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process user collection.
//!
//! Each user lives in one `DashMap` entry; an append holds that entry's
//! shard lock for the whole push-and-increment, so concurrent appends to
//! the same user are serialized and none are lost.

use crate::error::AppError;
use crate::models::{Exercise, User, UserSummary};
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

struct StoredUser {
    /// Insertion sequence, used to list users in creation order
    seq: u64,
    user: User,
}

/// In-memory document store. Clones share the same collection.
#[derive(Clone, Default)]
pub struct MemoryDb {
    users: Arc<DashMap<String, StoredUser>>,
    next_seq: Arc<AtomicU64>,
    closed: Arc<AtomicBool>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    fn ensure_open(&self) -> Result<(), AppError> {
        if self.is_closed() {
            return Err(AppError::Database("Store is closed".to_string()));
        }
        Ok(())
    }

    pub fn insert_user(&self, user: &User) -> Result<(), AppError> {
        self.ensure_open()?;

        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.users.insert(
            user.id.clone(),
            StoredUser {
                seq,
                user: user.clone(),
            },
        );
        Ok(())
    }

    /// `None` once the store has been closed.
    pub fn list_users(&self) -> Option<Vec<UserSummary>> {
        if self.is_closed() {
            return None;
        }

        let mut entries: Vec<(u64, UserSummary)> = self
            .users
            .iter()
            .map(|entry| (entry.seq, entry.user.summary()))
            .collect();
        entries.sort_by_key(|(seq, _)| *seq);
        Some(entries.into_iter().map(|(_, summary)| summary).collect())
    }

    pub fn get_user(&self, id: &str) -> Result<Option<User>, AppError> {
        self.ensure_open()?;
        Ok(self.users.get(id).map(|entry| entry.user.clone()))
    }

    pub fn append_exercise(
        &self,
        id: &str,
        exercise: &Exercise,
    ) -> Result<Option<User>, AppError> {
        self.ensure_open()?;

        let Some(mut entry) = self.users.get_mut(id) else {
            return Ok(None);
        };
        entry.user.push_exercise(exercise.clone());
        Ok(Some(entry.user.clone()))
    }

    /// Detach the collection; every clone sees the store as closed.
    pub fn close(self) {
        self.closed.store(true, Ordering::Release);
        tracing::info!(users = self.users.len(), "In-memory store closed");
    }
}
