//! # HTTP API Errors
//!
//! Maps store errors onto HTTP responses.
//!
//! Body shape: `{"error": "<message>", "details": [{"field", "message"}]}`,
//! with `details` present only for validation failures.
//!
//! Upstream failures reach the client as a fixed message. The underlying
//! weather error is logged only.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::records::{ErrorKind, StoreError};
use crate::schema::FieldError;

/// Client-facing message for weather enrichment failures
pub const UPSTREAM_MESSAGE: &str = "Weather enrichment failed";

/// Result type for HTTP handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP API errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Store rejected the operation
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Request body was not valid JSON
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Query string could not be parsed
    #[error("Invalid query parameter: {0}")]
    InvalidQuery(String),

    /// Unexpected fault; details are not exposed
    #[error("Internal Server Error")]
    Internal,
}

impl ApiError {
    /// Message safe to return to the client
    pub fn client_message(&self) -> String {
        match self {
            ApiError::Store(e) if e.kind() == ErrorKind::Upstream => UPSTREAM_MESSAGE.to_string(),
            _ => self.to_string(),
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Store(e) => match e.kind() {
                ErrorKind::Validation => StatusCode::BAD_REQUEST,
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Upstream => StatusCode::BAD_GATEWAY,
            },
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        let details = match err {
            ApiError::Store(e) => e.field_errors().map(<[FieldError]>::to_vec),
            _ => None,
        };
        Self {
            error: err.client_message(),
            details,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), error = %self, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "request rejected");
        }
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}
