//! # Record Store Errors
//!
//! Every failure the store can report. Callers branch on [`ErrorKind`];
//! presentation (status codes, bodies) belongs to the transport layer.

use std::fmt;

use thiserror::Error;

use crate::schema::{FieldError, SchemaError};
use crate::weather::WeatherError;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Error taxonomy shared with the transport layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input failed schema checks
    Validation,
    /// Referenced id does not exist
    NotFound,
    /// Weather enrichment failed
    Upstream,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "ValidationError",
            ErrorKind::NotFound => "NotFoundError",
            ErrorKind::Upstream => "UpstreamError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record store errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Input failed validation; carries the ordered field errors
    #[error("Validation failed")]
    Validation(#[from] SchemaError),

    /// No record with this id
    #[error("Record not found")]
    NotFound { id: String },

    /// Weather lookup failed; the create was abandoned
    #[error("Weather enrichment failed: {0}")]
    Upstream(#[from] WeatherError),
}

impl StoreError {
    pub fn not_found(id: impl Into<String>) -> Self {
        StoreError::NotFound { id: id.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Validation(_) => ErrorKind::Validation,
            StoreError::NotFound { .. } => ErrorKind::NotFound,
            StoreError::Upstream(_) => ErrorKind::Upstream,
        }
    }

    /// Field errors for validation failures, `None` otherwise
    pub fn field_errors(&self) -> Option<&[FieldError]> {
        match self {
            StoreError::Validation(e) => Some(e.errors()),
            _ => None,
        }
    }
}
