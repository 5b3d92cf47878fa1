//! Schema validation error types
//!
//! A failed validation carries every violated constraint, one entry per
//! field, in schema declaration order.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// A single field-level violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Field path (e.g., "rating"), or "$root" when the input is not an object
    pub field: String,
    /// Human-readable description of the violation
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn required(field: impl Into<String>) -> Self {
        Self::new(field, "Required")
    }

    pub fn type_mismatch(field: impl Into<String>, expected: &str, actual: &str) -> Self {
        Self::new(field, format!("Expected {}, received {}", expected, actual))
    }

    pub fn too_short(field: impl Into<String>) -> Self {
        Self::new(field, "String must contain at least 1 character(s)")
    }

    pub fn below_min(field: impl Into<String>, min: f64) -> Self {
        Self::new(field, format!("Number must be greater than or equal to {}", min))
    }

    pub fn above_max(field: impl Into<String>, max: f64) -> Self {
        Self::new(field, format!("Number must be less than or equal to {}", max))
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation failure with the ordered list of field errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed: {}", joined(.errors))]
pub struct SchemaError {
    errors: Vec<FieldError>,
}

impl SchemaError {
    /// Builds an error from collected violations.
    ///
    /// Callers only construct this with at least one violation.
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    /// A single-violation error
    pub fn single(error: FieldError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    /// Violations in schema declaration order
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }

    /// True if any violation concerns `field`
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

fn joined(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(FieldError::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
