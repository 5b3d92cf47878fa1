//! # Record Store
//!
//! Owns the travel record collection. Insertion order is preserved.
//!
//! One `RwLock` covers append, remove and in-place update. The lock is never
//! held across an `.await`: the weather lookup in [`RecordStore::create`]
//! completes before the record is assembled and appended, so a dropped create
//! future commits nothing.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use serde_json::Value;
use uuid::Uuid;

use crate::schema::SchemaValidator;
use crate::weather::{DisabledWeather, WeatherLookup};

use super::errors::{StoreError, StoreResult};
use super::model::TravelRecord;

/// In-memory travel record store
pub struct RecordStore {
    records: RwLock<Vec<TravelRecord>>,
    validator: SchemaValidator,
    weather: Arc<dyn WeatherLookup>,
}

impl RecordStore {
    /// Creates an empty store that enriches through `weather`.
    pub fn new(weather: Arc<dyn WeatherLookup>) -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            validator: SchemaValidator::default(),
            weather,
        }
    }

    /// Creates an empty store whose enrichment always fails.
    pub fn without_weather() -> Self {
        Self::new(Arc::new(DisabledWeather))
    }

    /// Validates `input`, optionally fetches weather, and appends a new record.
    ///
    /// # Errors
    ///
    /// - `Validation` if `input` fails full-mode validation
    /// - `Upstream` if enrichment was requested and the lookup failed
    ///
    /// Nothing is stored on error.
    pub async fn create(&self, input: &Value, enrich_weather: bool) -> StoreResult<TravelRecord> {
        let input = self.validator.validate_input(input)?;

        let weather = if enrich_weather {
            Some(
                self.weather
                    .fetch_weather(&input.destination_name, &input.country)
                    .await?,
            )
        } else {
            None
        };

        let record = TravelRecord::new(Uuid::new_v4().to_string(), input, weather, now_millis());

        self.records.write().push(record.clone());
        Ok(record)
    }

    /// Snapshot of every record in insertion order
    pub fn list(&self) -> Vec<TravelRecord> {
        self.records.read().clone()
    }

    /// Returns the record with `id`.
    pub fn get(&self, id: &str) -> StoreResult<TravelRecord> {
        self.records
            .read()
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(id))
    }

    /// Merges the fields present in `input` into the record with `id`.
    ///
    /// An unknown id is reported before `input` is validated.
    pub fn update(&self, id: &str, input: &Value) -> StoreResult<TravelRecord> {
        let mut records = self.records.write();

        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::not_found(id))?;

        let patch = self.validator.validate_patch(input)?;
        let updated_at = next_timestamp(record.updated_at);
        record.apply(patch, updated_at);

        Ok(record.clone())
    }

    /// Removes the record with `id`.
    ///
    /// Deleting an id twice fails the second time.
    pub fn delete(&self, id: &str) -> StoreResult<()> {
        let mut records = self.records.write();

        let index = records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| StoreError::not_found(id))?;

        records.remove(index);
        Ok(())
    }

    /// Drops every record. Issued ids stay retired.
    pub fn reset(&self) {
        self.records.write().clear();
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::without_weather()
    }
}

/// Current time truncated to whole milliseconds, the serialized precision.
fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

/// A timestamp strictly after `previous`.
fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = now_millis();
    if now > previous {
        now
    } else {
        previous + Duration::milliseconds(1)
    }
}
