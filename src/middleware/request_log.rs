// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-request access log line.

use axum::{extract::Request, middleware::Next, response::Response};

/// Log the method and path of every request before handling it.
pub async fn log_request(req: Request, next: Next) -> Response {
    tracing::info!("{} {}", req.method(), req.uri().path());
    next.run(req).await
}
