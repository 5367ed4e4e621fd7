//! Extractor for the acting user.
//!
//! Authentication lives in the gateway in front of this service; by the time a
//! request arrives, the principal has been resolved into an `X-User-Id`
//! header. A missing or malformed header is a client error.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{request::Parts, StatusCode};

use crate::errors::JsonApiError;

pub struct UserId(pub i64);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for UserId {
    type Rejection = JsonApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                JsonApiError::new(
                    StatusCode::BAD_REQUEST,
                    "Bad Request",
                    Some("missing X-User-Id header".into()),
                )
            })?;
        let id = raw.parse::<i64>().map_err(|_| {
            JsonApiError::new(
                StatusCode::BAD_REQUEST,
                "Bad Request",
                Some("X-User-Id must be an integer".into()),
            )
        })?;
        Ok(UserId(id))
    }
}
