//! Search request extractor.
//!
//! Parses the JSON search body into [`SearchParams`]. Unknown scopes,
//! operators and unsupported filter values are rejected while parsing, so
//! every parse failure is a client error.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header,
};
use reporting_search::SearchParams;

use crate::error::RestError;

/// Axum extractor for device search requests.
///
/// Unlike `axum::Json`, every malformed body is rejected with
/// `400 Bad Request` and the JSON error body used by the rest of the API.
#[derive(Debug)]
pub struct SearchRequest(pub SearchParams);

impl SearchRequest {
    /// Consumes the extractor and returns the search parameters.
    pub fn into_inner(self) -> SearchParams {
        self.0
    }
}

impl<S> FromRequest<S> for SearchRequest
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // Must own the string before moving req
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/json")
            .to_ascii_lowercase();

        if !content_type.contains("json") {
            return Err(RestError::BadRequest {
                message: format!("unsupported content type: {}", content_type),
            });
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| RestError::BadRequest {
                message: format!("failed to read request body: {}", e),
            })?;

        let params = serde_json::from_slice(&bytes).map_err(|e| RestError::BadRequest {
            message: format!("malformed request body: {}", e),
        })?;

        Ok(SearchRequest(params))
    }
}
