//! Travel record entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::schema::{Rating, TravelRecordInput, TravelRecordPatch};

/// A visited destination.
///
/// Serialized with camelCase keys; absent optional fields are omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelRecord {
    pub id: String,
    pub destination_name: String,
    pub country: String,
    pub visit_date: String,
    pub rating: Rating,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_highlight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_list: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
}

impl TravelRecord {
    /// Assembles a new record. `created_at` and `updated_at` both start at `now`.
    pub fn new(
        id: String,
        input: TravelRecordInput,
        weather: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            destination_name: input.destination_name,
            country: input.country,
            visit_date: input.visit_date,
            rating: input.rating,
            created_at: now,
            updated_at: now,
            record_type: input.record_type,
            notes: input.notes,
            image_url: input.image_url,
            mood: input.mood,
            highlight: input.highlight,
            food_highlight: input.food_highlight,
            bucket_list: input.bucket_list,
            emoji: input.emoji,
            weather,
        }
    }

    /// Merges the fields present in `patch` and stamps `updated_at`.
    ///
    /// `id`, `created_at` and `weather` are never touched.
    pub fn apply(&mut self, patch: TravelRecordPatch, updated_at: DateTime<Utc>) {
        let TravelRecordPatch {
            destination_name,
            country,
            visit_date,
            rating,
            record_type,
            notes,
            image_url,
            mood,
            highlight,
            food_highlight,
            bucket_list,
            emoji,
        } = patch;

        merge(&mut self.destination_name, destination_name);
        merge(&mut self.country, country);
        merge(&mut self.visit_date, visit_date);
        merge(&mut self.rating, rating);
        merge_opt(&mut self.record_type, record_type);
        merge_opt(&mut self.notes, notes);
        merge_opt(&mut self.image_url, image_url);
        merge_opt(&mut self.mood, mood);
        merge_opt(&mut self.highlight, highlight);
        merge_opt(&mut self.food_highlight, food_highlight);
        merge_opt(&mut self.bucket_list, bucket_list);
        merge_opt(&mut self.emoji, emoji);

        self.updated_at = updated_at;
    }
}

fn merge<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}

fn merge_opt<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

/// ISO-8601 timestamps with millisecond precision and a `Z` suffix.
mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
