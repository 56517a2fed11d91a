// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! User model for storage and API.

use crate::models::Exercise;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// User document stored in the `users` collection, with its exercise log
/// embedded.
///
/// `count` is maintained alongside `log` on every append, so for a stored
/// document `count == log.len()`. Filtered reads replace `log` but leave
/// `count` at the all-time total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub struct User {
    /// Opaque identifier (also used as document ID)
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub count: u32,
    #[serde(default)]
    pub log: Vec<Exercise>,
}

impl User {
    /// A fresh user with an empty log.
    pub fn new(id: String, username: String) -> Self {
        Self {
            id,
            username,
            count: 0,
            log: Vec::new(),
        }
    }

    /// Append an entry and bump the running count.
    pub fn push_exercise(&mut self, exercise: Exercise) {
        self.log.push(exercise);
        self.count += 1;
    }

    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id.clone(),
            username: self.username.clone(),
        }
    }
}

/// User projected to identifier and name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub struct UserSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
}
