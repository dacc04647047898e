//! Translation of search parameters into the Elasticsearch Query DSL.
//!
//! Device attributes are indexed as nested objects, one array per scope:
//!
//! ```json
//! {
//!   "id": "...",
//!   "inventoryAttributes": [
//!     { "name": "cpu_count", "numeric": [4] },
//!     { "name": "hostname", "string": ["gateway"] }
//!   ]
//! }
//! ```
//!
//! Filters compile to `nested` queries over these arrays so that the name
//! and the value of one attribute are matched together.

pub mod builder;
pub mod dsl;
pub mod predicate;
pub mod sort;
pub mod value_type;

pub use builder::build_search_query;
pub use dsl::{
    BoolQuery, ExistsClause, FieldClause, NestedQuery, NestedSort, Query, QueryDocument,
    RangeClause, RangeOp, SortClause, SortMode, SortOptions,
};
pub use predicate::{Branch, CompiledFilter, compile_filter};
pub use sort::compile_sort;
pub use value_type::{FieldType, classify};
