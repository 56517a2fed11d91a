// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Exercise entries and the record returned when one is logged.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// One logged activity, embedded in a user's log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub struct Exercise {
    pub description: String,
    /// Minutes
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub duration: i64,
    /// Date as supplied when the entry was logged
    pub date: String,
}

/// Response for a newly logged exercise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub struct ExerciseRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    /// Canonical form, e.g. `Sun Jan 15 2023`
    pub date: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub duration: i64,
    pub description: String,
}
