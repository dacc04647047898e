//! Elasticsearch search client.

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use elasticsearch::auth::Credentials;
use elasticsearch::cert::CertificateValidation;
use elasticsearch::http::transport::{SingleNodeConnectionPool, TransportBuilder};
use elasticsearch::{Elasticsearch, SearchParts};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{SearchClient, empty_response};
use crate::error::{ReportingResult, UpstreamError};
use crate::query::QueryDocument;

/// Authentication configuration for Elasticsearch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ElasticsearchAuth {
    /// Basic username/password authentication.
    Basic {
        /// The username for basic auth.
        username: String,
        /// The password for basic auth.
        password: String,
    },
    /// Bearer token authentication.
    Bearer {
        /// The bearer token.
        token: String,
    },
}

/// Configuration for the Elasticsearch client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElasticsearchConfig {
    /// Elasticsearch node URLs (e.g., `["http://localhost:9200"]`).
    /// Currently uses the first node (single-node connection pool).
    pub nodes: Vec<String>,

    /// Index name prefix (default: `"devices"`).
    /// Indices are named: `{prefix}-{tenant_id}`
    #[serde(default = "default_index_prefix")]
    pub index_prefix: String,

    /// Request timeout in milliseconds (default: 30000).
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Optional authentication.
    #[serde(default)]
    pub auth: Option<ElasticsearchAuth>,

    /// Whether to disable certificate validation (default: false).
    /// Only use for development/testing.
    #[serde(default)]
    pub disable_certificate_validation: bool,
}

fn default_index_prefix() -> String {
    "devices".to_string()
}

fn default_request_timeout_ms() -> u64 {
    30000
}

impl Default for ElasticsearchConfig {
    fn default() -> Self {
        Self {
            nodes: vec!["http://localhost:9200".to_string()],
            index_prefix: default_index_prefix(),
            request_timeout_ms: default_request_timeout_ms(),
            auth: None,
            disable_certificate_validation: false,
        }
    }
}

/// Runs device searches against per-tenant Elasticsearch indices.
pub struct ElasticsearchClient {
    client: Elasticsearch,
    config: ElasticsearchConfig,
}

impl Debug for ElasticsearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElasticsearchClient")
            .field("nodes", &self.config.nodes)
            .field("index_prefix", &self.config.index_prefix)
            .finish_non_exhaustive()
    }
}

impl ElasticsearchClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: ElasticsearchConfig) -> ReportingResult<Self> {
        let client = Self::build_client(&config)?;
        Ok(Self { client, config })
    }

    /// Builds the Elasticsearch client from configuration.
    fn build_client(config: &ElasticsearchConfig) -> ReportingResult<Elasticsearch> {
        let url = config
            .nodes
            .first()
            .cloned()
            .unwrap_or_else(|| "http://localhost:9200".to_string());

        let parsed_url: elasticsearch::http::Url =
            url.parse().map_err(|e| UpstreamError::Configuration {
                message: format!("Invalid URL {}: {}", url, e),
            })?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);

        let mut builder = TransportBuilder::new(conn_pool)
            .timeout(Duration::from_millis(config.request_timeout_ms));

        if config.disable_certificate_validation {
            builder = builder.cert_validation(CertificateValidation::None);
        }

        if let Some(ref auth) = config.auth {
            builder = match auth {
                ElasticsearchAuth::Basic { username, password } => {
                    builder.auth(Credentials::Basic(username.clone(), password.clone()))
                }
                ElasticsearchAuth::Bearer { token } => {
                    builder.auth(Credentials::Bearer(token.clone()))
                }
            };
        }

        let transport = builder.build().map_err(|e| UpstreamError::Configuration {
            message: format!("Failed to build transport: {}", e),
        })?;

        Ok(Elasticsearch::new(transport))
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &ElasticsearchConfig {
        &self.config
    }

    /// Returns the device index name for a tenant.
    ///
    /// Index names are lowercase; the tenant ID must already be restricted
    /// to characters that are not index pattern syntax.
    pub fn index_name(&self, tenant_id: &str) -> String {
        format!("{}-{}", self.config.index_prefix, tenant_id.to_lowercase())
    }
}

#[async_trait]
impl SearchClient for ElasticsearchClient {
    fn name(&self) -> &'static str {
        "elasticsearch"
    }

    async fn search(&self, tenant: &str, query: &QueryDocument) -> ReportingResult<Value> {
        let index = self.index_name(tenant);
        let body = serde_json::to_value(query)?;

        let response = self
            .client
            .search(SearchParts::Index(&[&index]))
            .track_total_hits(true)
            .body(body)
            .send()
            .await
            .map_err(|e| UpstreamError::Unavailable {
                message: format!("Search failed: {}", e),
            })?;

        let status = response.status_code();
        if !status.is_success() {
            let body = response.text().await;
            return failed_search(&index, status.as_u16(), body);
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| UpstreamError::InvalidResponse {
                message: format!("Failed to parse search response: {}", e),
            })?;

        Ok(body)
    }

    async fn health_check(&self) -> ReportingResult<()> {
        let response = self
            .client
            .cluster()
            .health(elasticsearch::cluster::ClusterHealthParts::None)
            .send()
            .await
            .map_err(|e| UpstreamError::Unavailable {
                message: format!("Health check failed: {}", e),
            })?;

        let status = response.status_code();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message: "cluster health request failed".to_string(),
            }
            .into());
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| UpstreamError::InvalidResponse {
                message: format!("Failed to parse health response: {}", e),
            })?;

        let cluster_status = body
            .get("status")
            .and_then(|s| s.as_str())
            .unwrap_or("unknown");

        if cluster_status == "red" {
            return Err(UpstreamError::Unavailable {
                message: "cluster status is red".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// Maps a non-success search response to a result.
///
/// A missing index yields an empty response; indices are created on first
/// ingest.
fn failed_search<E: std::fmt::Display>(
    index: &str,
    status: u16,
    body: Result<String, E>,
) -> ReportingResult<Value> {
    let body = body.map_err(|e| UpstreamError::InvalidResponse {
        message: format!("Failed to read error response (status {}): {}", status, e),
    })?;

    if body.contains("index_not_found_exception") {
        tracing::debug!(index = %index, "Device index does not exist yet");
        return Ok(empty_response());
    }

    Err(UpstreamError::Status {
        status,
        message: body,
    }
    .into())
}
