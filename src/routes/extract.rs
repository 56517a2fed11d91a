// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Extractors whose rejections share the `{error}` response shape.

use crate::error::AppError;
use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{header, request::Parts},
    Json,
};
use serde::de::DeserializeOwned;

/// Body parsed as JSON when the request says `application/json`, and as
/// `application/x-www-form-urlencoded` otherwise.
///
/// The form branch ignores the declared content type, so a body sent with
/// none (or `text/plain`) is still read as a form. Parse failures become
/// [`AppError::BadRequest`].
pub struct FormOrJson<T>(pub T);

fn is_json(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|content_type| content_type.starts_with("application/json"))
}

impl<S, T> FromRequest<S> for FormOrJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_json(&req) {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            Ok(Self(value))
        } else {
            let bytes = Bytes::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            let value = serde_urlencoded::from_bytes(&bytes)
                .map_err(|e| AppError::BadRequest(format!("Failed to parse form body: {}", e)))?;
            Ok(Self(value))
        }
    }
}

/// [`Path`] with rejections mapped to [`AppError::BadRequest`].
pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Signup {
        #[serde(default)]
        username: String,
    }

    async fn extract(content_type: Option<&str>, body: &str) -> Result<Signup, AppError> {
        let mut builder = Request::builder().method("POST").uri("/api/users");
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let req = builder.body(Body::from(body.to_string())).unwrap();
        FormOrJson::<Signup>::from_request(req, &())
            .await
            .map(|FormOrJson(value)| value)
    }

    #[tokio::test]
    async fn test_body_without_content_type_is_a_form() {
        let signup = extract(None, "username=alice").await.unwrap();
        assert_eq!(signup.username, "alice");

        let signup = extract(Some("text/plain"), "username=bob").await.unwrap();
        assert_eq!(signup.username, "bob");
    }

    #[tokio::test]
    async fn test_empty_form_body_uses_defaults() {
        let signup = extract(None, "").await.unwrap();
        assert_eq!(signup.username, "");
    }

    #[tokio::test]
    async fn test_json_body() {
        let signup = extract(Some("application/json"), r#"{"username":"carol"}"#)
            .await
            .unwrap();
        assert_eq!(signup.username, "carol");

        let err = extract(Some("application/json"), "{").await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
