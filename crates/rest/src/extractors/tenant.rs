//! Tenant extractor.
//!
//! The reporting API is internal and sits behind the gateway, which passes
//! the authenticated tenant in the `tenant` header.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, HeaderName, request::Parts},
};

use crate::error::RestError;

/// The header carrying the tenant ID.
pub const TENANT_HEADER: HeaderName = HeaderName::from_static("tenant");

/// Axum extractor for the tenant ID.
///
/// Rejects requests without a non-empty `tenant` header, and tenant IDs that
/// are not plain ASCII letters, digits, `_` and `-` starting with a letter or
/// digit. The tenant ID becomes part of an index name, where `*`, `,` and a
/// leading `_` select other indices.
///
/// # Example
///
/// ```rust,ignore
/// use reporting_rest::extractors::TenantExtractor;
///
/// async fn handler(tenant: TenantExtractor) {
///     println!("Tenant ID: {}", tenant.tenant_id());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct TenantExtractor {
    tenant_id: String,
}

impl TenantExtractor {
    /// Creates a new TenantExtractor with the given tenant ID.
    pub fn new(tenant_id: impl Into<String>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
        }
    }

    /// Returns the tenant ID.
    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }
}

impl std::fmt::Display for TenantExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tenant_id)
    }
}

/// Extracts the tenant ID from headers.
fn extract_tenant_id_from_headers(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(&TENANT_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Returns true if the tenant ID is safe to use in an index name.
pub fn is_valid_tenant_id(tenant_id: &str) -> bool {
    let mut chars = tenant_id.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphanumeric() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        }
        _ => false,
    }
}

impl<S> FromRequestParts<S> for TenantExtractor
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let tenant_id =
            extract_tenant_id_from_headers(&parts.headers).ok_or_else(|| RestError::BadRequest {
                message: "need `tenant` header".to_string(),
            })?;

        if !is_valid_tenant_id(tenant_id) {
            return Err(RestError::BadRequest {
                message: "invalid `tenant` header".to_string(),
            });
        }

        Ok(TenantExtractor::new(tenant_id))
    }
}
