use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use service::errors::ServiceError;

/// JSON error body returned by every API route.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: &'static str,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &'static str, detail: Option<String>) -> Self {
        Self { status, error, detail }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.error,
            "detail": self.detail,
        });
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match &e {
            ServiceError::Validation(msg) => {
                Self::new(StatusCode::BAD_REQUEST, "Validation Error", Some(msg.clone()))
            }
            ServiceError::Model(inner) => match inner {
                models::errors::ModelError::Validation(msg) => {
                    Self::new(StatusCode::BAD_REQUEST, "Validation Error", Some(msg.clone()))
                }
                models::errors::ModelError::Db(_) => internal(&e),
            },
            ServiceError::NotFound(_) => {
                Self::new(StatusCode::NOT_FOUND, "Not Found", Some(e.to_string()))
            }
            ServiceError::AlreadyExists(_) => {
                Self::new(StatusCode::CONFLICT, "Conflict", Some(e.to_string()))
            }
            ServiceError::Forbidden(_) => {
                Self::new(StatusCode::FORBIDDEN, "Forbidden", Some(e.to_string()))
            }
            ServiceError::Inconsistent(_) | ServiceError::Db(_) => internal(&e),
        }
    }
}

fn internal(e: &ServiceError) -> JsonApiError {
    error!(error = %e, "internal service error");
    JsonApiError::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal Server Error",
        Some(e.to_string()),
    )
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
