//! Common test utilities for REST API testing.
//!
//! Provides an in-memory [`RecordingClient`] that records every compiled
//! query and replays a canned search response, and helpers to start a test
//! server around it.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;
use reporting_rest::{AppState, ServerConfig};
use reporting_search::query::QueryDocument;
use reporting_search::{ReportingResult, SearchClient, UpstreamError};
use serde_json::{Value, json};

/// A query received by the [`RecordingClient`].
#[derive(Debug, Clone)]
pub struct RecordedQuery {
    /// The tenant the query was run for.
    pub tenant: String,
    /// The query document as sent to the search engine.
    pub body: Value,
}

/// In-memory search client.
pub struct RecordingClient {
    response: Value,
    healthy: bool,
    fail_search: bool,
    queries: Mutex<Vec<RecordedQuery>>,
}

impl RecordingClient {
    /// Creates a client that answers every search with `response`.
    pub fn new(response: Value) -> Self {
        Self {
            response,
            healthy: true,
            fail_search: false,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Makes health checks fail.
    pub fn unhealthy(mut self) -> Self {
        self.healthy = false;
        self
    }

    /// Makes searches fail with an upstream error.
    pub fn failing(mut self) -> Self {
        self.fail_search = true;
        self
    }

    /// Returns the recorded queries.
    pub fn queries(&self) -> Vec<RecordedQuery> {
        self.queries.lock().expect("queries lock").clone()
    }

    /// Returns the last recorded query.
    pub fn last_query(&self) -> RecordedQuery {
        self.queries().pop().expect("no query recorded")
    }
}

#[async_trait]
impl SearchClient for RecordingClient {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn search(&self, tenant: &str, query: &QueryDocument) -> ReportingResult<Value> {
        self.queries
            .lock()
            .expect("queries lock")
            .push(RecordedQuery {
                tenant: tenant.to_string(),
                body: serde_json::to_value(query)?,
            });

        if self.fail_search {
            return Err(UpstreamError::Status {
                status: 500,
                message: "shard failure".to_string(),
            }
            .into());
        }
        Ok(self.response.clone())
    }

    async fn health_check(&self) -> ReportingResult<()> {
        if self.healthy {
            Ok(())
        } else {
            Err(UpstreamError::Unavailable {
                message: "connection refused".to_string(),
            }
            .into())
        }
    }
}

/// Returns a search response with two devices and a total of 42.
pub fn two_devices() -> Value {
    json!({
        "took": 2,
        "hits": {
            "total": {"value": 42, "relation": "eq"},
            "hits": [
                {"_id": "dev-1", "_source": {
                    "id": "dev-1",
                    "inventoryAttributes": [
                        {"name": "status", "string": ["accepted"]},
                        {"name": "cpu_count", "numeric": [4]}
                    ],
                    "identityAttributes": [
                        {"name": "mac", "string": ["00:11:22:33:44:55"]}
                    ]
                }},
                {"_id": "dev-2", "_source": {
                    "id": "dev-2",
                    "customAttributes": [{"name": "tag", "string": ["a", "b"]}]
                }}
            ]
        }
    })
}

/// Starts a test server around `client` using the test configuration.
pub fn create_test_server(client: RecordingClient) -> (TestServer, Arc<RecordingClient>) {
    create_test_server_with_config(client, ServerConfig::for_testing())
}

/// Starts a test server around `client` with a custom configuration.
pub fn create_test_server_with_config(
    client: RecordingClient,
    config: ServerConfig,
) -> (TestServer, Arc<RecordingClient>) {
    let client = Arc::new(client);

    // Create app state manually to keep a handle on the client
    let state = AppState::new(Arc::clone(&client), config);
    let app = reporting_rest::routing::create_routes(state);
    let server = TestServer::new(app).expect("Failed to create test server");

    (server, client)
}
