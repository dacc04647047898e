//! Axum extractors for reporting requests.
//!
//! - [`TenantExtractor`] - Extract the tenant from the `tenant` header
//! - [`SearchRequest`] - Extract and parse a device search body

mod search_request;
mod tenant;

pub use search_request::SearchRequest;
pub use tenant::{TENANT_HEADER, TenantExtractor, is_valid_tenant_id};
