//! Search engine clients.
//!
//! The [`SearchClient`] trait is the only seam between query translation and
//! the search engine. It takes a compiled [`QueryDocument`] and returns the
//! raw response body, so the decoder stays independent of the transport.

#[cfg(feature = "elasticsearch")]
pub mod elasticsearch;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ReportingResult;
use crate::query::QueryDocument;

#[cfg(feature = "elasticsearch")]
pub use self::elasticsearch::{ElasticsearchAuth, ElasticsearchClient, ElasticsearchConfig};

/// A client that executes compiled queries against a tenant's device index.
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Returns a human-readable name for this client.
    fn name(&self) -> &'static str;

    /// Runs a query against the tenant's index and returns the raw response.
    ///
    /// The response must have the shape of an Elasticsearch search response,
    /// with the total hit count tracked exactly.
    async fn search(&self, tenant: &str, query: &QueryDocument) -> ReportingResult<Value>;

    /// Checks that the search engine is reachable and usable.
    async fn health_check(&self) -> ReportingResult<()>;
}

/// Returns a search response without any hits.
pub fn empty_response() -> Value {
    serde_json::json!({
        "hits": {
            "total": {"value": 0, "relation": "eq"},
            "hits": []
        }
    })
}
