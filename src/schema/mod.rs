//! Schema Validator for travel record input
//!
//! Turns untyped JSON into typed record input (create) or a record patch
//! (update), or into an ordered list of field errors.
//!
//! # Design Principles
//!
//! - One declared schema, checked in declaration order
//! - Failure is a returned value, never a panic
//! - Unknown fields are dropped silently
//! - No coercion: strings are never parsed as numbers or booleans

mod errors;
mod types;
mod validator;

pub use errors::{FieldError, SchemaError, SchemaResult};
pub use types::{
    FieldDef, FieldRule, FieldType, Rating, Schema, TravelRecordInput, TravelRecordPatch,
    MAX_RATING, MIN_RATING,
};
pub use validator::{SchemaValidator, ValidationMode};
