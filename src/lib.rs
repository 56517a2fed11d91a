// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Exercise Tracker: register users, log exercises, read them back.
//!
//! This crate provides a small REST API over a collection of user
//! documents, each embedding its exercise log.

pub mod coerce;
pub mod config;
pub mod dates;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use services::UserLogService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub user_log: UserLogService,
}
