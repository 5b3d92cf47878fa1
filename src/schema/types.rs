//! Schema type definitions for travel records
//!
//! Supported types:
//! - string: UTF-8 string, optionally required to be non-empty
//! - number: any JSON number, optionally bounded to a closed range
//! - boolean
//!
//! The travel record schema is declared once, in field order. Validation
//! errors are reported in this order.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// Supported field types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// UTF-8 string
    String,
    /// JSON number, integral or not
    Number,
    /// Boolean
    Bool,
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Bool => "boolean",
        }
    }
}

/// Extra constraint checked after the type matches
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldRule {
    /// String must contain at least one character
    NonEmpty,
    /// Number must lie in the closed range `[min, max]`
    Range { min: f64, max: f64 },
}

/// A single declared field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDef {
    /// Wire name of the field (camelCase)
    pub name: &'static str,
    /// Field data type
    pub field_type: FieldType,
    /// Whether the field must be present in full mode
    pub required: bool,
    /// Optional constraint on the value
    pub rule: Option<FieldRule>,
}

impl FieldDef {
    /// Create a required, non-empty string field
    pub const fn required_string(name: &'static str) -> Self {
        Self {
            name,
            field_type: FieldType::String,
            required: true,
            rule: Some(FieldRule::NonEmpty),
        }
    }

    /// Create an optional string field
    pub const fn optional_string(name: &'static str) -> Self {
        Self {
            name,
            field_type: FieldType::String,
            required: false,
            rule: None,
        }
    }

    /// Create a required number field bounded to `[min, max]`
    pub const fn required_range(name: &'static str, min: f64, max: f64) -> Self {
        Self {
            name,
            field_type: FieldType::Number,
            required: true,
            rule: Some(FieldRule::Range { min, max }),
        }
    }

    /// Create an optional boolean field
    pub const fn optional_bool(name: &'static str) -> Self {
        Self {
            name,
            field_type: FieldType::Bool,
            required: false,
            rule: None,
        }
    }
}

/// Lowest accepted rating.
pub const MIN_RATING: f64 = 1.0;
/// Highest accepted rating.
pub const MAX_RATING: f64 = 5.0;

const TRAVEL_RECORD_FIELDS: &[FieldDef] = &[
    FieldDef::required_string("destinationName"),
    FieldDef::required_string("country"),
    FieldDef::required_string("visitDate"),
    FieldDef::required_range("rating", MIN_RATING, MAX_RATING),
    FieldDef::optional_string("type"),
    FieldDef::optional_string("notes"),
    FieldDef::optional_string("imageUrl"),
    FieldDef::optional_string("mood"),
    FieldDef::optional_string("highlight"),
    FieldDef::optional_string("foodHighlight"),
    FieldDef::optional_bool("bucketList"),
    FieldDef::optional_string("emoji"),
];

/// An ordered set of field definitions
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    fields: &'static [FieldDef],
}

impl Schema {
    /// The schema every travel record input is checked against
    pub const fn travel_record() -> Self {
        Self {
            fields: TRAVEL_RECORD_FIELDS,
        }
    }

    /// Field definitions in declaration order
    pub fn fields(&self) -> &'static [FieldDef] {
        self.fields
    }

    /// Looks up a field definition by wire name
    pub fn field(&self, name: &str) -> Option<&'static FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A rating that is always finite and within `[MIN_RATING, MAX_RATING]`.
///
/// Whole ratings serialize as JSON integers (`4`), others as floats (`4.5`).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize)]
#[serde(try_from = "f64")]
pub struct Rating(f64);

impl Rating {
    /// Returns the rating if `value` is finite and in range.
    pub fn new(value: f64) -> Option<Self> {
        if value.is_finite() && (MIN_RATING..=MAX_RATING).contains(&value) {
            Some(Rating(value))
        } else {
            None
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Rating {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Rating::new(value).ok_or_else(|| {
            format!("rating must be between {} and {}, got {}", MIN_RATING, MAX_RATING, value)
        })
    }
}

impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.fract() == 0.0 {
            // Bounded to [1, 5], so the cast is exact
            serializer.serialize_i64(self.0 as i64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated input for creating a travel record.
#[derive(Debug, Clone, PartialEq)]
pub struct TravelRecordInput {
    pub destination_name: String,
    pub country: String,
    pub visit_date: String,
    pub rating: Rating,
    pub record_type: Option<String>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
    pub mood: Option<String>,
    pub highlight: Option<String>,
    pub food_highlight: Option<String>,
    pub bucket_list: Option<bool>,
    pub emoji: Option<String>,
}

/// Validated partial update. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TravelRecordPatch {
    pub destination_name: Option<String>,
    pub country: Option<String>,
    pub visit_date: Option<String>,
    pub rating: Option<Rating>,
    pub record_type: Option<String>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
    pub mood: Option<String>,
    pub highlight: Option<String>,
    pub food_highlight: Option<String>,
    pub bucket_list: Option<bool>,
    pub emoji: Option<String>,
}

impl TravelRecordPatch {
    /// True when the patch changes no field
    pub fn is_empty(&self) -> bool {
        *self == TravelRecordPatch::default()
    }
}
