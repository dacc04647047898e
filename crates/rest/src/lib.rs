//! # reporting-rest - Device Reporting HTTP API
//!
//! This crate exposes the device attribute search of [`reporting_search`]
//! over HTTP. It is an internal API: the gateway in front of it
//! authenticates callers and forwards the tenant in the `tenant` header.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use reporting_rest::{create_app_with_config, ServerConfig};
//! use reporting_search::ElasticsearchClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::default();
//!     let client = ElasticsearchClient::new(config.elasticsearch_config())?;
//!
//!     let app = create_app_with_config(client, config);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Interaction | HTTP Method | URL Pattern |
//! |------------|-------------|-------------|
//! | device search | POST | `/api/internal/v1/reporting/devices/search` |
//! | health | GET | `/health` |
//! | readiness | GET | `/_readiness` |
//!
//! ## Device Search
//!
//! ```json
//! {
//!   "page": 1,
//!   "per_page": 20,
//!   "filters": [
//!     {"scope": "inventory", "attribute": "status", "type": "$eq", "value": "accepted"}
//!   ],
//!   "sort": [
//!     {"scope": "inventory", "attribute": "cpu_count", "order": "desc"}
//!   ],
//!   "attributes": [
//!     {"scope": "identity", "attribute": "mac"}
//!   ]
//! }
//! ```
//!
//! A non-positive `page` is treated as 1 and a non-positive `per_page` as the
//! configured default page size. The response is a JSON array of devices with
//! the total number of matches in the `X-Total-Count` header. Adding
//! `?output=raw_es` returns the Elasticsearch response instead.
//!
//! ## Error Handling
//!
//! Errors are returned as `{"error": "..."}`:
//!
//! | HTTP Status | Description |
//! |-------------|-------------|
//! | 400 | Missing tenant, malformed body, invalid filter |
//! | 500 | Search engine failure, unexpected search document |
//! | 503 | Readiness check failed |
//!
//! ## Architecture
//!
//! - [`error`] - Error types and JSON error responses
//! - [`config`] - Server configuration
//! - [`state`] - Application state (reporting service, configuration)
//! - [`handlers`] - HTTP request handlers
//! - [`extractors`] - Axum extractors for the tenant and the search body
//! - [`routing`] - Route configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{RestError, RestResult};
pub use state::AppState;

use std::sync::Arc;

use axum::Router;
use reporting_search::SearchClient;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

/// Creates the Axum application with default configuration.
///
/// This is a convenience function that creates the app with default settings.
/// For more control, use [`create_app_with_config`].
pub fn create_app<C>(client: C) -> Router
where
    C: SearchClient + 'static,
{
    create_app_with_config(client, ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// This function sets up the reporting routes with tracing and request
/// timeout middleware.
///
/// # Arguments
///
/// * `client` - The search client to use
/// * `config` - Server configuration
pub fn create_app_with_config<C>(client: C, config: ServerConfig) -> Router
where
    C: SearchClient + 'static,
{
    info!("Creating reporting API server with client: {}", client.name());

    let request_timeout = config.request_timeout;

    // Create application state
    let state = AppState::new(Arc::new(client), config);

    let router = routing::reporting_routes::create_routes(state);

    // Build middleware stack
    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(request_timeout),
        ));

    router.layer(service_builder)
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "reporting_rest={level},reporting_search={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
