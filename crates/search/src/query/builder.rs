//! Assembles complete search request bodies.

use tracing::debug;

use crate::error::{ValidationError, ValidationResult};
use crate::types::SearchParams;

use super::dsl::{BoolQuery, Query, QueryDocument};
use super::predicate::{Branch, compile_filter};
use super::sort::compile_sort;

/// Compiles search parameters into a query document.
///
/// Paging must already be normalized; non-positive values are rejected.
/// Filters keep their order within the `must` and `must_not` branches.
pub fn build_search_query(params: &SearchParams) -> ValidationResult<QueryDocument> {
    params.validate()?;

    let mut query = BoolQuery::default();
    for filter in &params.filters {
        let compiled = compile_filter(filter)?;
        match compiled.branch {
            Branch::Must => query.must.push(compiled.query),
            Branch::MustNot => query.must_not.push(compiled.query),
        }
    }

    let (from, size) = page_window(params.page, params.per_page)?;

    debug!(
        filters = params.filters.len(),
        must = query.must.len(),
        must_not = query.must_not.len(),
        sort = params.sort.len(),
        from,
        size,
        "Compiled search query"
    );

    Ok(QueryDocument {
        query: Query::Bool(query),
        sort: compile_sort(&params.sort),
        from,
        size,
    })
}

/// Converts a validated page and page size into `(from, size)`.
fn page_window(page: i64, per_page: i64) -> ValidationResult<(u64, u64)> {
    let size = u64::try_from(per_page).map_err(|_| ValidationError::InvalidPaging {
        field: "per_page",
        value: per_page,
    })?;
    let from = u64::try_from(page - 1)
        .ok()
        .and_then(|p| p.checked_mul(size))
        .ok_or(ValidationError::InvalidPaging {
            field: "page",
            value: page,
        })?;
    Ok((from, size))
}
