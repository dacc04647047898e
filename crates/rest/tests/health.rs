//! Integration tests for the health and readiness endpoints.

mod common;

use axum::http::StatusCode;
use serde_json::Value;

use common::{RecordingClient, create_test_server, two_devices};

#[tokio::test]
async fn test_health() {
    let (server, _client) = create_test_server(RecordingClient::new(two_devices()));

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_health_does_not_need_search_engine() {
    let (server, _client) = create_test_server(RecordingClient::new(two_devices()).unhealthy());

    server.get("/health").await.assert_status_ok();
}

#[tokio::test]
async fn test_readiness() {
    let (server, _client) = create_test_server(RecordingClient::new(two_devices()));

    let response = server.get("/_readiness").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["client"], "recording");
}

#[tokio::test]
async fn test_readiness_unavailable() {
    let (server, _client) = create_test_server(RecordingClient::new(two_devices()).unhealthy());

    let response = server.get("/_readiness").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["error"], "recording is not ready");
}
