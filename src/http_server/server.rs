//! # HTTP Server
//!
//! Combines the record, health and docs routers into one axum service.

use std::any::Any;
use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, Any as CorsAny, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::records::RecordStore;

use super::config::{parse_origin, HttpServerConfig};
use super::docs_routes::docs_routes;
use super::errors::ApiError;
use super::observability_routes::health_routes;
use super::record_routes::record_routes;

/// Mount point of the record routes
pub const RECORDS_PATH: &str = "/api/travel-records";

/// HTTP server for the travel record API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over `store` with custom configuration
    pub fn with_config(config: HttpServerConfig, store: Arc<RecordStore>) -> Self {
        let router = build_router(&config, store);
        Self { config, router }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until Ctrl-C.
    pub async fn start(self) -> Result<(), std::io::Error> {
        let listener = TcpListener::bind(self.config.socket_addr()).await?;
        let addr = listener.local_addr()?;

        tracing::info!(%addr, "travel records server listening");
        tracing::info!("records: http://{}{}", addr, RECORDS_PATH);
        tracing::info!("docs: http://{}/api-docs", addr);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("server stopped");
        Ok(())
    }
}

/// Build the combined router with all endpoints
pub fn build_router(config: &HttpServerConfig, store: Arc<RecordStore>) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(docs_routes())
        .nest(RECORDS_PATH, record_routes(store))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config))
}

fn cors_layer(config: &HttpServerConfig) -> CorsLayer {
    if config.cors_origins.is_empty() {
        // No origins configured: permissive, for development
        CorsLayer::new()
            .allow_origin(CorsAny)
            .allow_methods(CorsAny)
            .allow_headers(CorsAny)
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|origin| {
                let parsed = parse_origin(origin);
                if parsed.is_none() {
                    tracing::warn!(%origin, "ignoring invalid CORS origin");
                }
                parsed
            })
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(CorsAny)
            .allow_headers(CorsAny)
    }
}

fn panic_response(_err: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("request handler panicked");
    ApiError::Internal.into_response()
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
