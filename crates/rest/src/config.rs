//! Server configuration for the reporting API.
//!
//! This module provides configuration types for the REST server, supporting
//! both programmatic configuration and environment variable overrides.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `REPORTING_SERVER_PORT` | 8080 | Server port |
//! | `REPORTING_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `REPORTING_LOG_LEVEL` | info | Log level |
//! | `REPORTING_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `REPORTING_DEFAULT_PAGE_SIZE` | 20 | Page size used when `per_page` is not positive |
//! | `REPORTING_MAX_PAGE_SIZE` | 500 | Largest accepted `per_page` |
//! | `REPORTING_ELASTICSEARCH_NODES` | http://localhost:9200 | Elasticsearch URLs (comma-separated) |
//! | `REPORTING_ELASTICSEARCH_INDEX_PREFIX` | devices | Device index prefix |
//! | `REPORTING_ELASTICSEARCH_USERNAME` | | Basic auth username |
//! | `REPORTING_ELASTICSEARCH_PASSWORD` | | Basic auth password |
//! | `REPORTING_ELASTICSEARCH_TOKEN` | | Bearer token (instead of basic auth) |
//! | `REPORTING_ELASTICSEARCH_TIMEOUT_MS` | 30000 | Elasticsearch request timeout (ms) |
//!
//! # Example
//!
//! ```rust
//! use reporting_rest::ServerConfig;
//!
//! // Create from environment
//! let config = ServerConfig::from_env();
//!
//! // Or create programmatically
//! let config = ServerConfig {
//!     port: 3000,
//!     host: "0.0.0.0".to_string(),
//!     ..Default::default()
//! };
//! ```

use clap::Parser;

/// Server configuration for the reporting API.
///
/// This struct can be constructed from environment variables using [`ServerConfig::from_env`],
/// from command line arguments using [`ServerConfig::parse`], or programmatically.
#[derive(Debug, Clone, Parser)]
#[command(name = "reporting")]
#[command(about = "Device reporting search server")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "REPORTING_SERVER_PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "REPORTING_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "REPORTING_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Request timeout in seconds.
    #[arg(long, env = "REPORTING_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Page size used when a search asks for a non-positive page size.
    #[arg(long, env = "REPORTING_DEFAULT_PAGE_SIZE", default_value = "20")]
    pub default_page_size: i64,

    /// Largest page size a search may ask for.
    #[arg(long, env = "REPORTING_MAX_PAGE_SIZE", default_value = "500")]
    pub max_page_size: i64,

    /// Elasticsearch node URLs (comma-separated).
    #[arg(
        long,
        env = "REPORTING_ELASTICSEARCH_NODES",
        default_value = "http://localhost:9200"
    )]
    pub elasticsearch_nodes: String,

    /// Prefix of the per-tenant device indices.
    #[arg(
        long,
        env = "REPORTING_ELASTICSEARCH_INDEX_PREFIX",
        default_value = "devices"
    )]
    pub elasticsearch_index_prefix: String,

    /// Elasticsearch basic auth username.
    #[arg(long, env = "REPORTING_ELASTICSEARCH_USERNAME")]
    pub elasticsearch_username: Option<String>,

    /// Elasticsearch basic auth password.
    #[arg(long, env = "REPORTING_ELASTICSEARCH_PASSWORD")]
    pub elasticsearch_password: Option<String>,

    /// Elasticsearch bearer token.
    #[arg(long, env = "REPORTING_ELASTICSEARCH_TOKEN")]
    pub elasticsearch_token: Option<String>,

    /// Elasticsearch request timeout in milliseconds.
    #[arg(long, env = "REPORTING_ELASTICSEARCH_TIMEOUT_MS", default_value = "30000")]
    pub elasticsearch_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            request_timeout: 30,
            default_page_size: 20,
            max_page_size: 500,
            elasticsearch_nodes: "http://localhost:9200".to_string(),
            elasticsearch_index_prefix: "devices".to_string(),
            elasticsearch_username: None,
            elasticsearch_password: None,
            elasticsearch_token: None,
            elasticsearch_timeout_ms: 30000,
        }
    }
}

impl ServerConfig {
    /// Creates a new ServerConfig from environment variables.
    ///
    /// This is a convenience method that parses environment variables without
    /// requiring command line arguments.
    pub fn from_env() -> Self {
        // Try to parse from environment, falling back to defaults
        Self::try_parse().unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the configured Elasticsearch node URLs.
    pub fn elasticsearch_node_list(&self) -> Vec<String> {
        self.elasticsearch_nodes
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }

    /// Builds the Elasticsearch client configuration.
    #[cfg(feature = "elasticsearch")]
    pub fn elasticsearch_config(&self) -> reporting_search::client::ElasticsearchConfig {
        use reporting_search::client::{ElasticsearchAuth, ElasticsearchConfig};

        let auth = match (
            &self.elasticsearch_username,
            &self.elasticsearch_password,
            &self.elasticsearch_token,
        ) {
            (Some(username), Some(password), _) => Some(ElasticsearchAuth::Basic {
                username: username.clone(),
                password: password.clone(),
            }),
            (_, _, Some(token)) => Some(ElasticsearchAuth::Bearer {
                token: token.clone(),
            }),
            _ => None,
        };

        ElasticsearchConfig {
            nodes: self.elasticsearch_node_list(),
            index_prefix: self.elasticsearch_index_prefix.clone(),
            request_timeout_ms: self.elasticsearch_timeout_ms,
            auth,
            ..Default::default()
        }
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.default_page_size < 1 {
            errors.push("Default page size must be positive".to_string());
        }

        if self.default_page_size > self.max_page_size {
            errors.push("Default page size cannot exceed max page size".to_string());
        }

        if self.elasticsearch_node_list().is_empty() {
            errors.push("At least one Elasticsearch node is required".to_string());
        }

        if self.elasticsearch_index_prefix.is_empty() {
            errors.push("Elasticsearch index prefix cannot be empty".to_string());
        }

        if self.elasticsearch_username.is_some() != self.elasticsearch_password.is_some() {
            errors.push(
                "Elasticsearch username and password must be set together".to_string(),
            );
        }

        if self.elasticsearch_username.is_some() && self.elasticsearch_token.is_some() {
            errors.push(
                "Elasticsearch basic auth and bearer token cannot both be set".to_string(),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// This uses ephemeral port 0 and small page sizes.
    pub fn for_testing() -> Self {
        Self {
            port: 0, // Let OS assign port
            log_level: "debug".to_string(),
            request_timeout: 5, // Shorter timeout for tests
            default_page_size: 10,
            max_page_size: 100,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.default_page_size, 20);
        assert_eq!(config.elasticsearch_index_prefix, "devices");
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            port: 3000,
            host: "0.0.0.0".to_string(),
            ..Default::default()
        };
        assert_eq!(config.socket_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_validate_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_port() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().iter().any(|e| e.contains("Port")));
    }

    #[test]
    fn test_validate_invalid_page_sizes() {
        let config = ServerConfig {
            default_page_size: 100,
            max_page_size: 50,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ServerConfig {
            default_page_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_partial_credentials() {
        let config = ServerConfig {
            elasticsearch_username: Some("elastic".to_string()),
            ..Default::default()
        };
        let errors = config.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.contains("username and password")));
    }

    #[test]
    fn test_node_list() {
        let config = ServerConfig {
            elasticsearch_nodes: "http://es1:9200, http://es2:9200,".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.elasticsearch_node_list(),
            vec!["http://es1:9200", "http://es2:9200"]
        );

        let config = ServerConfig {
            elasticsearch_nodes: " ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "elasticsearch")]
    #[test]
    fn test_elasticsearch_config() {
        let config = ServerConfig {
            elasticsearch_index_prefix: "reporting".to_string(),
            elasticsearch_username: Some("elastic".to_string()),
            elasticsearch_password: Some("secret".to_string()),
            elasticsearch_timeout_ms: 1000,
            ..Default::default()
        };

        let es = config.elasticsearch_config();
        assert_eq!(es.nodes, vec!["http://localhost:9200"]);
        assert_eq!(es.index_prefix, "reporting");
        assert_eq!(es.request_timeout_ms, 1000);
        assert!(matches!(
            es.auth,
            Some(reporting_search::client::ElasticsearchAuth::Basic { ref username, .. })
                if username == "elastic"
        ));
    }

    #[cfg(feature = "elasticsearch")]
    #[test]
    fn test_elasticsearch_bearer_token() {
        let config = ServerConfig {
            elasticsearch_token: Some("abc123".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        let es = config.elasticsearch_config();
        assert!(matches!(
            es.auth,
            Some(reporting_search::client::ElasticsearchAuth::Bearer { ref token })
                if token == "abc123"
        ));
    }

    #[test]
    fn test_validate_conflicting_auth() {
        let config = ServerConfig {
            elasticsearch_username: Some("elastic".to_string()),
            elasticsearch_password: Some("secret".to_string()),
            elasticsearch_token: Some("abc123".to_string()),
            ..Default::default()
        };
        let errors = config.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.contains("bearer token")));
    }

    #[test]
    fn test_for_testing() {
        let config = ServerConfig::for_testing();
        assert_eq!(config.port, 0);
        assert_eq!(config.default_page_size, 10);
        assert_eq!(config.max_page_size, 100);
    }
}
