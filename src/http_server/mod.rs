//! # HTTP Server Module
//!
//! Transport layer over the record store. Handlers only translate between
//! HTTP and store calls; every rule lives in the store and validator.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api-docs` - OpenAPI document
//! - `/api/travel-records/*` - Travel record CRUD

pub mod config;
pub mod docs_routes;
pub mod errors;
pub mod observability_routes;
pub mod record_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse, UPSTREAM_MESSAGE};
pub use server::{build_router, HttpServer, RECORDS_PATH};
