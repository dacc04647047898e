//! Application state for the reporting API.
//!
//! This module defines the shared application state that is available to all
//! request handlers: the reporting service and the server configuration.

use std::sync::Arc;

use reporting_search::{ReportingService, SearchClient};

use crate::config::ServerConfig;

/// Shared application state for the REST API.
///
/// # Type Parameters
///
/// * `C` - The search client type (must implement [`SearchClient`])
///
/// # Example
///
/// ```rust,ignore
/// use reporting_rest::{AppState, ServerConfig};
/// use reporting_search::{ElasticsearchClient, ElasticsearchConfig};
/// use std::sync::Arc;
///
/// let client = ElasticsearchClient::new(ElasticsearchConfig::default())?;
/// let state = AppState::new(Arc::new(client), ServerConfig::default());
/// ```
pub struct AppState<C: SearchClient> {
    /// The reporting service.
    service: ReportingService<C>,

    /// Server configuration.
    config: Arc<ServerConfig>,
}

// Manually implement Clone since C is wrapped in Arc and doesn't need to be Clone
impl<C: SearchClient> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

impl<C: SearchClient> AppState<C> {
    /// Creates a new AppState with the given search client and configuration.
    pub fn new(client: Arc<C>, config: ServerConfig) -> Self {
        Self {
            service: ReportingService::with_shared_client(client),
            config: Arc::new(config),
        }
    }

    /// Returns the reporting service.
    pub fn service(&self) -> &ReportingService<C> {
        &self.service
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the page size used when a search does not ask for one.
    pub fn default_page_size(&self) -> i64 {
        self.config.default_page_size
    }

    /// Returns the largest page size a search may ask for.
    pub fn max_page_size(&self) -> i64 {
        self.config.max_page_size
    }
}
