// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod log_filter;
pub mod user_log;

pub use log_filter::LogFilter;
pub use user_log::UserLogService;
