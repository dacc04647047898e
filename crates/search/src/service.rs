//! Device search operations.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error};

use crate::client::SearchClient;
use crate::decode::decode_search_response;
use crate::error::ReportingResult;
use crate::query::build_search_query;
use crate::types::{DevicePage, SearchParams};

/// Compiles searches, runs them through a [`SearchClient`] and decodes the
/// results.
pub struct ReportingService<C: SearchClient> {
    client: Arc<C>,
}

impl<C: SearchClient> Clone for ReportingService<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

impl<C: SearchClient> ReportingService<C> {
    /// Creates a new service backed by the given client.
    pub fn new(client: C) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Creates a new service sharing an existing client.
    pub fn with_shared_client(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Returns the search client.
    pub fn client(&self) -> &Arc<C> {
        &self.client
    }

    /// Searches the tenant's devices.
    pub async fn search_devices(
        &self,
        tenant: &str,
        params: &SearchParams,
    ) -> ReportingResult<DevicePage> {
        let query = build_search_query(params)?;
        let response = self.client.search(tenant, &query).await?;

        let page = decode_search_response(&response, &params.selection()).inspect_err(|e| {
            error!(client = self.client.name(), error = %e, "Failed to decode search response");
        })?;

        debug!(
            devices = page.devices.len(),
            total = page.total,
            "Device search complete"
        );
        Ok(page)
    }

    /// Runs the search and returns the search engine response unchanged.
    pub async fn search_raw(&self, tenant: &str, params: &SearchParams) -> ReportingResult<Value> {
        let query = build_search_query(params)?;
        self.client.search(tenant, &query).await
    }

    /// Checks the search engine.
    pub async fn health_check(&self) -> ReportingResult<()> {
        self.client.health_check().await
    }
}
