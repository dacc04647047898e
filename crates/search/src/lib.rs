//! Device Reporting Search
//!
//! This crate translates attribute filter searches over devices into
//! Elasticsearch queries and decodes the search results back into the
//! attribute-oriented device representation used by the inventory.
//!
//! # Features
//!
//! - **Scoped Attributes**: identity, inventory and custom attributes, each
//!   indexed as a nested array
//! - **Filters**: `$eq`, `$ne`, `$regex`, `$in`, `$nin`, `$exists`, `$gt`,
//!   `$gte`, `$lt`, `$lte`
//! - **Sorting**: by any attribute, regardless of its stored type
//! - **Projection**: return only selected attributes
//!
//! Enable the Elasticsearch client with the `elasticsearch` feature (on by
//! default).
//!
//! # Architecture
//!
//! - [`types`] - Search requests and devices
//! - [`query`] - Compilation of search requests into query documents
//! - [`decode`] - Decoding of search responses into devices
//! - [`client`] - The search engine seam and its Elasticsearch implementation
//! - [`service`] - Search operations combining the above
//! - [`error`] - Error types for all operations
//!
//! # Quick Start
//!
//! ```
//! use reporting_search::query::build_search_query;
//! use reporting_search::types::{FilterPredicate, Operator, Scope, SearchParams};
//!
//! let params = SearchParams::new(20).with_filter(FilterPredicate::new(
//!     Scope::Inventory,
//!     "status",
//!     Operator::Eq,
//!     "accepted",
//! ));
//!
//! let query = build_search_query(&params).unwrap();
//! assert_eq!(query.from, 0);
//! assert_eq!(query.size, 20);
//! assert_eq!(query.bool_query().unwrap().must.len(), 1);
//! ```
//!
//! # Decoding
//!
//! ```
//! use reporting_search::decode::decode_search_response;
//! use reporting_search::types::{Scope, Selection};
//! use serde_json::json;
//!
//! let response = json!({
//!     "hits": {
//!         "total": {"value": 1},
//!         "hits": [{"_source": {
//!             "id": "dev-1",
//!             "customAttributes": [{"name": "tag", "string": ["a"]}]
//!         }}]
//!     }
//! });
//!
//! let page = decode_search_response(&response, &Selection::all()).unwrap();
//! assert_eq!(page.total, 1);
//! assert_eq!(page.devices[0].attribute(Scope::Custom, "tag").unwrap().name, "tag");
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod client;
pub mod decode;
pub mod error;
pub mod query;
pub mod service;
pub mod types;

// Re-export commonly used types at crate root
pub use client::SearchClient;
pub use error::{ReportingError, ReportingResult, TranslationError, UpstreamError, ValidationError};
pub use service::ReportingService;
pub use types::{Device, DevicePage, FilterPredicate, Operator, Scope, SearchParams};

#[cfg(feature = "elasticsearch")]
pub use client::{ElasticsearchClient, ElasticsearchConfig};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
