//! Record Store Invariant Tests
//!
//! Tests for the record store guarantees:
//! - Failed operations leave the store unchanged
//! - Ids are unique and never reissued
//! - Ratings stay within range through create and update
//! - Enrichment is all-or-nothing
//! - A dropped create commits nothing

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Notify;

use travel_records::records::{ErrorKind, RecordStore, StoreError};
use travel_records::weather::{WeatherError, WeatherLookup, WeatherResult};

// =============================================================================
// Helper Functions
// =============================================================================

struct SunnyWeather;

#[async_trait]
impl WeatherLookup for SunnyWeather {
    async fn fetch_weather(&self, destination: &str, country: &str) -> WeatherResult<String> {
        Ok(format!("sunny in {}, {}", destination, country))
    }
}

struct FailingWeather(WeatherError);

#[async_trait]
impl WeatherLookup for FailingWeather {
    async fn fetch_weather(&self, _destination: &str, _country: &str) -> WeatherResult<String> {
        Err(self.0.clone())
    }
}

/// Never answers until notified.
struct StalledWeather(Arc<Notify>);

#[async_trait]
impl WeatherLookup for StalledWeather {
    async fn fetch_weather(&self, _destination: &str, _country: &str) -> WeatherResult<String> {
        self.0.notified().await;
        Ok("late".to_string())
    }
}

fn destination(name: &str, rating: i64) -> Value {
    json!({
        "destinationName": name,
        "country": "Somewhere",
        "visitDate": "2024-01-01",
        "rating": rating
    })
}

// =============================================================================
// Create / Get Tests
// =============================================================================

/// create then get returns an equal record.
#[tokio::test]
async fn test_create_then_get_round_trips() {
    let store = RecordStore::without_weather();

    for (i, name) in ["Paris", "Tokyo", "Lima", "Oslo"].iter().enumerate() {
        let mut input = destination(name, (i as i64 % 5) + 1);
        input["mood"] = json!("curious");
        input["bucketList"] = json!(i % 2 == 0);

        let created = store.create(&input, false).await.unwrap();
        assert_eq!(store.get(&created.id).unwrap(), created);
    }
}

/// The Paris scenario produces a generated id and the given name.
#[tokio::test]
async fn test_paris_scenario() {
    let store = RecordStore::without_weather();
    let record = store
        .create(
            &json!({
                "destinationName": "Paris",
                "country": "France",
                "visitDate": "2023-07-15",
                "rating": 5
            }),
            false,
        )
        .await
        .unwrap();

    assert!(!record.id.is_empty());
    assert_eq!(record.destination_name, "Paris");
}

/// Every id issued is distinct, including ids issued after deletes and resets.
#[tokio::test]
async fn test_ids_are_never_reissued() {
    let store = RecordStore::without_weather();
    let mut seen = HashSet::new();

    for round in 0..5 {
        for i in 0..20 {
            let record = store
                .create(&destination(&format!("Place {}-{}", round, i), 3), false)
                .await
                .unwrap();
            assert!(seen.insert(record.id.clone()), "duplicate id {}", record.id);
            if i % 3 == 0 {
                store.delete(&record.id).unwrap();
            }
        }
        store.reset();
    }

    assert_eq!(seen.len(), 100);
}

// =============================================================================
// Rating Range Tests
// =============================================================================

/// Out-of-range ratings fail create and update without changing the store.
#[tokio::test]
async fn test_out_of_range_rating_never_stored() {
    let store = RecordStore::without_weather();
    let kept = store.create(&destination("Kept", 3), false).await.unwrap();

    for rating in [-10, 0, 6, 7, 1000] {
        let err = store.create(&destination("Bad", rating), false).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = store.update(&kept.id, &json!({ "rating": rating })).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    assert_eq!(store.list(), vec![kept]);
}

/// Half-star ratings are stored as given.
#[tokio::test]
async fn test_fractional_rating_stored() {
    let store = RecordStore::without_weather();
    let mut input = destination("Florence", 3);
    input["rating"] = json!(3.5);

    let created = store.create(&input, false).await.unwrap();
    assert_eq!(created.rating.get(), 3.5);

    let updated = store.update(&created.id, &json!({ "rating": 4.5 })).unwrap();
    assert_eq!(updated.rating.get(), 4.5);
    assert_eq!(store.get(&created.id).unwrap().rating.get(), 4.5);
}

/// Field errors for the invalid scenario name both offending fields.
#[tokio::test]
async fn test_invalid_scenario_reports_both_fields() {
    let store = RecordStore::without_weather();
    let err = store
        .create(&json!({ "destinationName": "", "rating": 6 }), false)
        .await
        .unwrap_err();

    match &err {
        StoreError::Validation(schema) => {
            assert!(schema.has_field("destinationName"));
            assert!(schema.has_field("rating"));
        }
        other => panic!("expected validation error, got {:?}", other),
    }
    assert!(store.is_empty());
}

// =============================================================================
// List Count Tests
// =============================================================================

/// list grows by one per create and shrinks by one per delete.
#[tokio::test]
async fn test_list_length_tracks_creates_and_deletes() {
    let store = RecordStore::without_weather();
    let mut ids = Vec::new();

    for i in 0..10 {
        let before = store.list().len();
        ids.push(store.create(&destination("X", 4), false).await.unwrap().id);
        assert_eq!(store.list().len(), before + 1, "after create {}", i);
    }

    for id in ids {
        let before = store.list().len();
        store.delete(&id).unwrap();
        assert_eq!(store.list().len(), before - 1);
    }
}

// =============================================================================
// Update Tests
// =============================================================================

/// An update with rating and notes changes exactly those fields.
#[tokio::test]
async fn test_update_scenario() {
    let store = RecordStore::without_weather();
    let created = store.create(&destination("Berlin", 4), false).await.unwrap();

    let updated = store
        .update(&created.id, &json!({ "rating": 5, "notes": "Updated" }))
        .unwrap();

    assert_eq!(updated.rating.get(), 5.0);
    assert_eq!(updated.notes.as_deref(), Some("Updated"));
    assert!(updated.updated_at > created.updated_at);
    assert_eq!(updated.created_at, created.created_at);
}

/// Consecutive updates keep advancing updatedAt.
#[tokio::test]
async fn test_updated_at_is_monotonic() {
    let store = RecordStore::without_weather();
    let created = store.create(&destination("Rome", 5), false).await.unwrap();

    let mut last = created.updated_at;
    for _ in 0..25 {
        let updated = store.update(&created.id, &json!({})).unwrap();
        assert!(updated.updated_at > last);
        assert!(updated.updated_at >= updated.created_at);
        last = updated.updated_at;
    }
}

/// Ids supplied in a patch are ignored.
#[tokio::test]
async fn test_update_cannot_change_identity() {
    let store = RecordStore::without_weather();
    let created = store.create(&destination("Rome", 5), false).await.unwrap();

    let updated = store
        .update(
            &created.id,
            &json!({ "id": "hijack", "createdAt": "1999-01-01T00:00:00.000Z", "weather": "snow" }),
        )
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.weather.is_none());
}

// =============================================================================
// Not Found Tests
// =============================================================================

/// Unknown and deleted ids fail with NotFound everywhere.
#[tokio::test]
async fn test_unknown_and_deleted_ids() {
    let store = RecordStore::without_weather();
    let created = store.create(&destination("Rome", 5), false).await.unwrap();
    store.delete(&created.id).unwrap();

    for id in ["non-existent-id", created.id.as_str()] {
        assert_eq!(store.get(id).unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(
            store.update(id, &json!({ "rating": 2 })).unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert_eq!(store.delete(id).unwrap_err().kind(), ErrorKind::NotFound);
    }
}

// =============================================================================
// Enrichment Tests
// =============================================================================

/// Successful enrichment stores the description.
#[tokio::test]
async fn test_enrichment_success() {
    let store = RecordStore::new(Arc::new(SunnyWeather));
    let record = store.create(&destination("Lisbon", 5), true).await.unwrap();
    assert_eq!(record.weather.as_deref(), Some("sunny in Lisbon, Somewhere"));

    let plain = store.create(&destination("Porto", 4), false).await.unwrap();
    assert!(plain.weather.is_none());
}

/// Every kind of enrichment failure leaves no orphan record.
#[tokio::test]
async fn test_enrichment_failure_is_all_or_nothing() {
    let failures = [
        WeatherError::NotConfigured,
        WeatherError::Network("connection refused".into()),
        WeatherError::Status {
            status: 401,
            body: "invalid key".into(),
        },
        WeatherError::Parse("expected value".into()),
        WeatherError::MissingDescription,
    ];

    for failure in failures {
        let store = RecordStore::new(Arc::new(FailingWeather(failure.clone())));
        store.create(&destination("Kept", 2), false).await.unwrap();
        let before = store.list();

        let err = store.create(&destination("Lost", 5), true).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Upstream);
        assert!(matches!(err, StoreError::Upstream(ref e) if *e == failure));
        assert_eq!(store.list(), before);
    }
}

/// Validation runs before the lookup: invalid input never reaches weather.
#[tokio::test]
async fn test_validation_precedes_enrichment() {
    let store = RecordStore::new(Arc::new(FailingWeather(WeatherError::NotConfigured)));
    let err = store.create(&destination("Bad", 9), true).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

// =============================================================================
// Concurrency Tests
// =============================================================================

/// A create abandoned mid-lookup never commits.
#[tokio::test]
async fn test_cancelled_create_commits_nothing() {
    let notify = Arc::new(Notify::new());
    let store = RecordStore::new(Arc::new(StalledWeather(notify.clone())));

    let result = tokio::time::timeout(
        Duration::from_millis(50),
        store.create(&destination("Never", 5), true),
    )
    .await;

    assert!(result.is_err(), "create should still be waiting on weather");
    notify.notify_waiters();
    assert!(store.is_empty());
}

/// Other operations proceed while a create waits on weather.
#[tokio::test]
async fn test_store_usable_during_pending_lookup() {
    let notify = Arc::new(Notify::new());
    let store = Arc::new(RecordStore::new(Arc::new(StalledWeather(notify.clone()))));

    let pending = {
        let store = store.clone();
        tokio::spawn(async move { store.create(&destination("Slow", 5), true).await })
    };

    let fast = store.create(&destination("Fast", 4), false).await.unwrap();
    store.update(&fast.id, &json!({ "notes": "while waiting" })).unwrap();
    assert_eq!(store.len(), 1);

    // Keep notifying until the spawned create has registered its waiter.
    while !pending.is_finished() {
        notify.notify_waiters();
        tokio::task::yield_now().await;
    }
    let slow = pending.await.unwrap().unwrap();

    let names: Vec<_> = store.list().into_iter().map(|r| r.destination_name).collect();
    assert_eq!(names, vec!["Fast", "Slow"]);
    assert_eq!(slow.weather.as_deref(), Some("late"));
}

/// Parallel creates each get a distinct id and all land in the store.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_creates() {
    let store = Arc::new(RecordStore::new(Arc::new(SunnyWeather)));

    let handles: Vec<_> = (0..64)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .create(&destination(&format!("City {}", i), (i % 5) + 1), i % 2 == 0)
                    .await
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        let record = handle.await.unwrap().unwrap();
        assert!(ids.insert(record.id));
    }

    assert_eq!(store.len(), 64);
}
