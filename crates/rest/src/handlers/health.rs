//! Health check endpoint handlers.
//!
//! Provides liveness and readiness endpoints for monitoring and load balancers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use reporting_search::SearchClient;
use tracing::{debug, warn};

use crate::error::{RestError, RestResult};
use crate::state::AppState;

/// Handler for the health check endpoint.
///
/// Reports that the process is up without touching the search engine.
///
/// # HTTP Request
///
/// `GET [base]/health`
///
/// # Response
///
/// - `200 OK` - Server is healthy
pub async fn health_handler() -> impl IntoResponse {
    debug!("Processing health check request");

    let health_response = serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    });

    (StatusCode::OK, Json(health_response))
}

/// Handler for a readiness probe.
///
/// Checks that the search engine can serve queries.
///
/// # HTTP Request
///
/// `GET [base]/_readiness`
///
/// # Response
///
/// - `200 OK` - Search engine is usable
/// - `503 Service Unavailable` - Search engine check failed
pub async fn readiness_handler<C>(State(state): State<AppState<C>>) -> RestResult<Response>
where
    C: SearchClient + 'static,
{
    debug!("Processing readiness check request");

    let client = state.service().client().name();

    if let Err(e) = state.service().health_check().await {
        warn!(client, error = %e, "Readiness check failed");
        return Err(RestError::ServiceUnavailable {
            message: format!("{} is not ready", client),
        });
    }

    let response = serde_json::json!({
        "status": "ready",
        "client": client,
    });

    Ok((StatusCode::OK, Json(response)).into_response())
}
