//! Schema validator for travel record input
//!
//! Validation semantics:
//! - Full mode: all required fields present, every present field well-typed
//! - Partial mode: every field optional, every present field well-typed
//! - Rules (non-empty strings, rating range) apply in both modes
//! - Unknown fields are dropped, never rejected
//! - `null` is the same as an absent field
//!
//! Validation is deterministic and never mutates its input. All violations
//! are collected, one per field, in schema declaration order.

use std::collections::HashMap;

use serde_json::{Map, Value};

use super::errors::{FieldError, SchemaError, SchemaResult};
use super::types::{
    FieldDef, FieldRule, FieldType, Rating, Schema, TravelRecordInput, TravelRecordPatch,
};

/// Whether required fields must be present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Create: required fields must be present
    Full,
    /// Update: every field is optional
    Partial,
}

/// A value that passed its field's type and rule checks
#[derive(Debug, Clone, PartialEq)]
enum FieldValue {
    Text(String),
    Number(f64),
    Bool(bool),
}

/// Schema validator that turns untyped JSON into typed record input.
#[derive(Debug, Clone, Copy)]
pub struct SchemaValidator {
    schema: Schema,
}

impl SchemaValidator {
    /// Creates a validator for the given schema.
    pub fn new(schema: Schema) -> Self {
        Self { schema }
    }

    /// Validates input for record creation.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError` listing every violated field when a required
    /// field is missing, a field has the wrong type, or a rule fails.
    pub fn validate_input(&self, input: &Value) -> SchemaResult<TravelRecordInput> {
        let mut fields = self.validate_fields(input, ValidationMode::Full)?;

        Ok(TravelRecordInput {
            destination_name: fields.required_text("destinationName")?,
            country: fields.required_text("country")?,
            visit_date: fields.required_text("visitDate")?,
            rating: fields
                .rating("rating")
                .ok_or_else(|| SchemaError::single(FieldError::required("rating")))?,
            record_type: fields.text("type"),
            notes: fields.text("notes"),
            image_url: fields.text("imageUrl"),
            mood: fields.text("mood"),
            highlight: fields.text("highlight"),
            food_highlight: fields.text("foodHighlight"),
            bucket_list: fields.flag("bucketList"),
            emoji: fields.text("emoji"),
        })
    }

    /// Validates input for a partial update.
    ///
    /// Absent fields stay `None` in the returned patch.
    pub fn validate_patch(&self, input: &Value) -> SchemaResult<TravelRecordPatch> {
        let mut fields = self.validate_fields(input, ValidationMode::Partial)?;

        Ok(TravelRecordPatch {
            destination_name: fields.text("destinationName"),
            country: fields.text("country"),
            visit_date: fields.text("visitDate"),
            rating: fields.rating("rating"),
            record_type: fields.text("type"),
            notes: fields.text("notes"),
            image_url: fields.text("imageUrl"),
            mood: fields.text("mood"),
            highlight: fields.text("highlight"),
            food_highlight: fields.text("foodHighlight"),
            bucket_list: fields.flag("bucketList"),
            emoji: fields.text("emoji"),
        })
    }

    /// Checks every declared field and keeps the ones that passed.
    fn validate_fields(&self, input: &Value, mode: ValidationMode) -> SchemaResult<ValidatedFields> {
        let obj = input.as_object().ok_or_else(|| {
            SchemaError::single(FieldError::type_mismatch(
                "$root",
                "object",
                json_type_name(input),
            ))
        })?;

        let mut values = HashMap::new();
        let mut errors = Vec::new();

        for def in self.schema.fields() {
            match present_value(obj, def.name) {
                Some(value) => match check_value(def, value) {
                    Ok(checked) => {
                        values.insert(def.name, checked);
                    }
                    Err(e) => errors.push(e),
                },
                None => {
                    if mode == ValidationMode::Full && def.required {
                        errors.push(missing_error(def, obj));
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(ValidatedFields { values })
        } else {
            Err(SchemaError::new(errors))
        }
    }
}

impl Default for SchemaValidator {
    fn default() -> Self {
        Self::new(Schema::travel_record())
    }
}

/// Fields that passed validation, keyed by wire name
struct ValidatedFields {
    values: HashMap<&'static str, FieldValue>,
}

impl ValidatedFields {
    fn text(&mut self, name: &str) -> Option<String> {
        match self.values.remove(name) {
            Some(FieldValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    fn required_text(&mut self, name: &str) -> SchemaResult<String> {
        self.text(name)
            .ok_or_else(|| SchemaError::single(FieldError::required(name)))
    }

    fn rating(&mut self, name: &str) -> Option<Rating> {
        match self.values.remove(name) {
            Some(FieldValue::Number(n)) => Rating::new(n),
            _ => None,
        }
    }

    fn flag(&mut self, name: &str) -> Option<bool> {
        match self.values.remove(name) {
            Some(FieldValue::Bool(b)) => Some(b),
            _ => None,
        }
    }
}

/// Returns the field's value unless it is absent or null.
fn present_value<'v>(obj: &'v Map<String, Value>, name: &str) -> Option<&'v Value> {
    obj.get(name).filter(|v| !v.is_null())
}

/// Error for a required field that is absent or null.
fn missing_error(def: &FieldDef, obj: &Map<String, Value>) -> FieldError {
    if obj.contains_key(def.name) {
        FieldError::type_mismatch(def.name, def.field_type.type_name(), "null")
    } else {
        FieldError::required(def.name)
    }
}

/// Checks a present value against its definition.
fn check_value(def: &FieldDef, value: &Value) -> Result<FieldValue, FieldError> {
    let mismatch = || FieldError::type_mismatch(def.name, def.field_type.type_name(), json_type_name(value));

    match def.field_type {
        FieldType::String => {
            let s = value.as_str().ok_or_else(mismatch)?;
            if def.rule == Some(FieldRule::NonEmpty) && s.is_empty() {
                return Err(FieldError::too_short(def.name));
            }
            Ok(FieldValue::Text(s.to_string()))
        }
        FieldType::Number => {
            let n = as_number(value).ok_or_else(mismatch)?;
            if let Some(FieldRule::Range { min, max }) = def.rule {
                if n < min {
                    return Err(FieldError::below_min(def.name, min));
                }
                if n > max {
                    return Err(FieldError::above_max(def.name, max));
                }
            }
            Ok(FieldValue::Number(n))
        }
        FieldType::Bool => value.as_bool().map(FieldValue::Bool).ok_or_else(mismatch),
    }
}

/// Reads a finite JSON number.
fn as_number(value: &Value) -> Option<f64> {
    let Value::Number(n) = value else {
        return None;
    };
    n.as_f64().filter(|f| f.is_finite())
}

/// Returns the JSON type name for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paris() -> Value {
        json!({
            "destinationName": "Paris",
            "country": "France",
            "visitDate": "2023-07-15",
            "rating": 5
        })
    }

    #[test]
    fn test_valid_input_passes() {
        let input = SchemaValidator::default().validate_input(&paris()).unwrap();
        assert_eq!(input.destination_name, "Paris");
        assert_eq!(input.country, "France");
        assert_eq!(input.visit_date, "2023-07-15");
        assert_eq!(input.rating.get(), 5.0);
        assert!(input.notes.is_none());
        assert!(input.bucket_list.is_none());
    }

    #[test]
    fn test_optional_fields_are_kept() {
        let mut doc = paris();
        doc["notes"] = json!("Amazing trip");
        doc["bucketList"] = json!(true);
        doc["type"] = json!("city");
        doc["emoji"] = json!("🗼");

        let input = SchemaValidator::default().validate_input(&doc).unwrap();
        assert_eq!(input.notes.as_deref(), Some("Amazing trip"));
        assert_eq!(input.bucket_list, Some(true));
        assert_eq!(input.record_type.as_deref(), Some("city"));
        assert_eq!(input.emoji.as_deref(), Some("🗼"));
    }

    #[test]
    fn test_unknown_fields_are_dropped() {
        let mut doc = paris();
        doc["id"] = json!("forged");
        doc["weather"] = json!("sunny");
        doc["userId"] = json!(42);

        let input = SchemaValidator::default().validate_input(&doc).unwrap();
        assert_eq!(input.destination_name, "Paris");
    }

    #[test]
    fn test_errors_follow_declaration_order() {
        let doc = json!({ "rating": 6, "destinationName": "" });
        let err = SchemaValidator::default().validate_input(&doc).unwrap_err();

        let fields: Vec<_> = err.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["destinationName", "country", "visitDate", "rating"]);
        assert_eq!(err.errors()[0].message, "String must contain at least 1 character(s)");
        assert_eq!(err.errors()[1].message, "Required");
        assert_eq!(err.errors()[3].message, "Number must be less than or equal to 5");
    }

    #[test]
    fn test_rating_range() {
        let validator = SchemaValidator::default();
        for bad in [0, 6, -1, 100] {
            let mut doc = paris();
            doc["rating"] = json!(bad);
            let err = validator.validate_input(&doc).unwrap_err();
            assert_eq!(err.errors().len(), 1);
            assert_eq!(err.errors()[0].field, "rating");
        }

        let mut doc = paris();
        doc["rating"] = json!(0);
        let err = validator.validate_input(&doc).unwrap_err();
        assert_eq!(err.errors()[0].message, "Number must be greater than or equal to 1");
    }

    #[test]
    fn test_rating_type() {
        let validator = SchemaValidator::default();

        let mut doc = paris();
        doc["rating"] = json!(4.5);
        assert_eq!(validator.validate_input(&doc).unwrap().rating.get(), 4.5);

        doc["rating"] = json!(4.0);
        assert_eq!(validator.validate_input(&doc).unwrap().rating.get(), 4.0);

        doc["rating"] = json!("5");
        let err = validator.validate_input(&doc).unwrap_err();
        assert_eq!(err.errors()[0].message, "Expected number, received string");

        doc["rating"] = json!(true);
        let err = validator.validate_input(&doc).unwrap_err();
        assert_eq!(err.errors()[0].message, "Expected number, received boolean");

        doc["rating"] = json!(u64::MAX);
        let err = validator.validate_input(&doc).unwrap_err();
        assert_eq!(err.errors()[0].message, "Number must be less than or equal to 5");

        doc["rating"] = json!(0.5);
        let err = validator.validate_input(&doc).unwrap_err();
        assert_eq!(err.errors()[0].message, "Number must be greater than or equal to 1");
    }

    #[test]
    fn test_optional_type_mismatch() {
        let mut doc = paris();
        doc["bucketList"] = json!("yes");
        doc["notes"] = json!(12);

        let err = SchemaValidator::default().validate_input(&doc).unwrap_err();
        assert_eq!(
            err.errors(),
            &[
                FieldError::type_mismatch("notes", "string", "number"),
                FieldError::type_mismatch("bucketList", "boolean", "string"),
            ]
        );
    }

    #[test]
    fn test_null_required_field() {
        let mut doc = paris();
        doc["country"] = Value::Null;
        let err = SchemaValidator::default().validate_input(&doc).unwrap_err();
        assert_eq!(err.errors()[0].message, "Expected string, received null");
    }

    #[test]
    fn test_null_optional_field_is_absent() {
        let mut doc = paris();
        doc["mood"] = Value::Null;
        let input = SchemaValidator::default().validate_input(&doc).unwrap();
        assert!(input.mood.is_none());
    }

    #[test]
    fn test_non_object_input() {
        let err = SchemaValidator::default().validate_input(&json!([1, 2])).unwrap_err();
        assert_eq!(err.errors().len(), 1);
        assert_eq!(err.errors()[0].field, "$root");
        assert_eq!(err.errors()[0].message, "Expected object, received array");
    }

    #[test]
    fn test_partial_mode_allows_missing_fields() {
        let patch = SchemaValidator::default()
            .validate_patch(&json!({ "rating": 4, "notes": "Updated notes" }))
            .unwrap();
        assert_eq!(patch.rating.map(Rating::get), Some(4.0));
        assert_eq!(patch.notes.as_deref(), Some("Updated notes"));
        assert!(patch.destination_name.is_none());
    }

    #[test]
    fn test_partial_mode_checks_present_fields() {
        let validator = SchemaValidator::default();
        let err = validator.validate_patch(&json!({ "rating": 10 })).unwrap_err();
        assert!(err.has_field("rating"));

        let err = validator.validate_patch(&json!({ "country": "" })).unwrap_err();
        assert!(err.has_field("country"));
    }

    #[test]
    fn test_partial_mode_empty_and_null() {
        let validator = SchemaValidator::default();
        assert!(validator.validate_patch(&json!({})).unwrap().is_empty());
        assert!(validator
            .validate_patch(&json!({ "notes": null, "rating": null }))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_validation_is_deterministic() {
        let validator = SchemaValidator::default();
        let doc = json!({ "destinationName": 1, "rating": "x" });
        let first = validator.validate_input(&doc).unwrap_err();
        for _ in 0..50 {
            assert_eq!(validator.validate_input(&doc).unwrap_err(), first);
        }
    }
}
