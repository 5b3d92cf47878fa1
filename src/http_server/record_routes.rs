//! Travel Record HTTP Routes
//!
//! CRUD endpoints over the record store. Mounted under `/api/travel-records`.
//!
//! - `POST /` (`?weather=true` to enrich) → 201
//! - `GET /` → 200
//! - `GET /:id` → 200
//! - `PATCH /:id` → 200
//! - `DELETE /:id` → 204

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;

use crate::records::{RecordStore, TravelRecord};

use super::errors::{ApiError, ApiResult};

/// Query parameters for record creation
#[derive(Debug, Default, Deserialize)]
pub struct CreateParams {
    /// Enrich the new record with current weather
    #[serde(default)]
    pub weather: bool,
}

/// Create travel record routes
pub fn record_routes(store: Arc<RecordStore>) -> Router {
    Router::new()
        .route("/", get(list_handler).post(create_handler))
        .route(
            "/:id",
            get(get_handler).patch(update_handler).delete(delete_handler),
        )
        .with_state(store)
}

fn json_body(body: Result<Json<Value>, JsonRejection>) -> ApiResult<Value> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))
}

async fn create_handler(
    State(store): State<Arc<RecordStore>>,
    params: Result<Query<CreateParams>, QueryRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<TravelRecord>)> {
    let Query(params) = params.map_err(|e| ApiError::InvalidQuery(e.body_text()))?;
    let body = json_body(body)?;

    let record = store.create(&body, params.weather).await?;
    tracing::info!(id = %record.id, weather = params.weather, "travel record created");

    Ok((StatusCode::CREATED, Json(record)))
}

async fn list_handler(State(store): State<Arc<RecordStore>>) -> Json<Vec<TravelRecord>> {
    Json(store.list())
}

async fn get_handler(
    State(store): State<Arc<RecordStore>>,
    Path(id): Path<String>,
) -> ApiResult<Json<TravelRecord>> {
    Ok(Json(store.get(&id)?))
}

async fn update_handler(
    State(store): State<Arc<RecordStore>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<TravelRecord>> {
    let body = json_body(body)?;

    let record = store.update(&id, &body)?;
    tracing::info!(id = %record.id, "travel record updated");

    Ok(Json(record))
}

async fn delete_handler(
    State(store): State<Arc<RecordStore>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    store.delete(&id)?;
    tracing::info!(id = %id, "travel record deleted");

    Ok(StatusCode::NO_CONTENT)
}
