//! Device search handler.
//!
//! - `POST [base]/api/internal/v1/reporting/devices/search`

use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use reporting_search::{SearchClient, SearchParams};
use serde::Deserialize;
use tracing::debug;

use crate::error::RestResult;
use crate::extractors::{SearchRequest, TenantExtractor};
use crate::state::AppState;

/// Response header carrying the total number of matching devices.
pub const X_TOTAL_COUNT: HeaderName = HeaderName::from_static("x-total-count");

/// Query parameters of the search endpoint.
#[derive(Debug, Deserialize, Default)]
pub struct SearchOutput {
    /// `raw_es` returns the search engine response unchanged.
    pub output: Option<String>,
}

impl SearchOutput {
    /// Returns true if the raw search engine response was requested.
    pub fn is_raw(&self) -> bool {
        self.output.as_deref() == Some("raw_es")
    }
}

/// Handler for device search.
///
/// # HTTP Request
///
/// `POST [base]/api/internal/v1/reporting/devices/search[?output=raw_es]`
///
/// # Response
///
/// Returns the matching devices as a JSON array, with the total number of
/// matches in the `X-Total-Count` header. With `output=raw_es` the search
/// engine response is returned as-is.
pub async fn search_devices_handler<C>(
    State(state): State<AppState<C>>,
    tenant: TenantExtractor,
    Query(output): Query<SearchOutput>,
    SearchRequest(params): SearchRequest,
) -> RestResult<Response>
where
    C: SearchClient + 'static,
{
    let params = normalize_paging(params, state.default_page_size(), state.max_page_size());

    debug!(
        tenant = %tenant,
        page = params.page,
        per_page = params.per_page,
        filters = params.filters.len(),
        raw = output.is_raw(),
        "Processing device search request"
    );

    if output.is_raw() {
        let raw = state
            .service()
            .search_raw(tenant.tenant_id(), &params)
            .await?;
        return Ok((StatusCode::OK, Json(raw)).into_response());
    }

    let page = state
        .service()
        .search_devices(tenant.tenant_id(), &params)
        .await?;

    Ok((
        StatusCode::OK,
        [(X_TOTAL_COUNT, HeaderValue::from(page.total))],
        Json(page.devices),
    )
        .into_response())
}

/// Substitutes defaults for missing or out-of-range paging.
fn normalize_paging(
    mut params: SearchParams,
    default_page_size: i64,
    max_page_size: i64,
) -> SearchParams {
    if params.page < 1 {
        params.page = 1;
    }
    if params.per_page < 1 {
        params.per_page = default_page_size;
    }
    if params.per_page > max_page_size {
        params.per_page = max_page_size;
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_paging_defaults() {
        let params = SearchParams {
            page: 0,
            per_page: -3,
            ..Default::default()
        };
        let params = normalize_paging(params, 20, 500);
        assert_eq!(params.page, 1);
        assert_eq!(params.per_page, 20);
    }

    #[test]
    fn test_normalize_paging_clamps() {
        let params = SearchParams::new(1000).with_page(7);
        let params = normalize_paging(params, 20, 500);
        assert_eq!(params.page, 7);
        assert_eq!(params.per_page, 500);
    }

    #[test]
    fn test_output_mode() {
        assert!(!SearchOutput::default().is_raw());
        assert!(
            SearchOutput {
                output: Some("raw_es".to_string())
            }
            .is_raw()
        );
        assert!(
            !SearchOutput {
                output: Some("devices".to_string())
            }
            .is_raw()
        );
    }
}
