//! Reporting route configuration.

use axum::{
    Router,
    routing::{get, post},
};
use reporting_search::SearchClient;

use crate::handlers;
use crate::state::AppState;

/// Path of the internal device search endpoint.
pub const DEVICES_SEARCH_PATH: &str = "/api/internal/v1/reporting/devices/search";

/// Creates all reporting API routes.
///
/// # Routes
///
/// - `POST /api/internal/v1/reporting/devices/search` - Device search
/// - `GET /health` - Health check
/// - `GET /_readiness` - Readiness probe
pub fn create_routes<C>(state: AppState<C>) -> Router
where
    C: SearchClient + 'static,
{
    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/_readiness", get(handlers::readiness_handler::<C>))
        .route(
            DEVICES_SEARCH_PATH,
            post(handlers::search_devices_handler::<C>),
        )
        .with_state(state)
}
