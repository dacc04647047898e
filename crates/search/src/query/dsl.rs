//! Typed subset of the Elasticsearch Query DSL.
//!
//! The compiler builds these structures and serializes them only when the
//! query is sent, so compiled queries can be inspected as data in tests.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::types::{Operator, SortOrder, TypedValue};

/// A query clause.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Query {
    /// Boolean combination of clauses.
    Bool(BoolQuery),
    /// Query evaluated against single elements of a nested array field.
    Nested(NestedQuery),
    /// Analyzed match on a field.
    Match(FieldClause<TypedValue>),
    /// Regular expression match on a keyword field.
    Regexp(FieldClause<String>),
    /// Match any of several exact values.
    Terms(FieldClause<TypedValue>),
    /// Exact match on a keyword field.
    Term(FieldClause<String>),
    /// Range comparison.
    Range(RangeClause),
    /// Field presence.
    Exists(ExistsClause),
}

impl Query {
    /// Returns the inner bool query, if this is one.
    pub fn as_bool(&self) -> Option<&BoolQuery> {
        match self {
            Query::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the inner nested query, if this is one.
    pub fn as_nested(&self) -> Option<&NestedQuery> {
        match self {
            Query::Nested(n) => Some(n),
            _ => None,
        }
    }
}

/// A `bool` query. Empty branches are not serialized.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BoolQuery {
    /// Clauses that must match.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub must: Vec<Query>,

    /// Clauses that must not match.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub must_not: Vec<Query>,

    /// Clauses of which `minimum_should_match` must match.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub should: Vec<Query>,

    /// How many `should` clauses must match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_should_match: Option<u32>,
}

impl BoolQuery {
    /// Creates a bool query whose clauses must all match.
    pub fn must(clauses: Vec<Query>) -> Self {
        Self {
            must: clauses,
            ..Default::default()
        }
    }
}

/// A `nested` query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NestedQuery {
    /// The nested field path.
    pub path: String,
    /// The query applied to each nested element.
    pub query: Box<Query>,
}

impl NestedQuery {
    /// Creates a nested query over `path` with a bool query as its body.
    pub fn new(path: impl Into<String>, inner: BoolQuery) -> Self {
        Self {
            path: path.into(),
            query: Box::new(Query::Bool(inner)),
        }
    }

    /// Returns the inner bool query.
    pub fn inner_bool(&self) -> Option<&BoolQuery> {
        self.query.as_bool()
    }
}

/// A clause keyed by a field name, serialized as `{field: value}`.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldClause<T> {
    /// The field name.
    pub field: String,
    /// The clause body.
    pub value: T,
}

impl<T> FieldClause<T> {
    /// Creates a new field clause.
    pub fn new(field: impl Into<String>, value: T) -> Self {
        Self {
            field: field.into(),
            value,
        }
    }
}

impl<T: Serialize> Serialize for FieldClause<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.field, &self.value)?;
        map.end()
    }
}

/// Range comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOp {
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
}

impl RangeOp {
    /// Returns the range comparison for a filter operator, if it is one.
    pub fn from_operator(operator: Operator) -> Option<Self> {
        match operator {
            Operator::Gt => Some(RangeOp::Gt),
            Operator::Gte => Some(RangeOp::Gte),
            Operator::Lt => Some(RangeOp::Lt),
            Operator::Lte => Some(RangeOp::Lte),
            Operator::Eq
            | Operator::Ne
            | Operator::Regex
            | Operator::In
            | Operator::Nin
            | Operator::Exists => None,
        }
    }

    /// Returns the bound key used in a `range` clause.
    pub fn as_str(&self) -> &'static str {
        match self {
            RangeOp::Gt => "gt",
            RangeOp::Gte => "gte",
            RangeOp::Lt => "lt",
            RangeOp::Lte => "lte",
        }
    }
}

/// A `range` clause with a single bound, serialized as `{field: {op: value}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeClause {
    /// The field name.
    pub field: String,
    /// The comparison.
    pub op: RangeOp,
    /// The bound.
    pub value: TypedValue,
}

impl Serialize for RangeClause {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let bound = FieldClause::new(self.op.as_str(), &self.value);
        FieldClause::new(self.field.as_str(), bound).serialize(serializer)
    }
}

/// An `exists` clause.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExistsClause {
    /// The field that must be present.
    pub field: String,
}

/// How multi-valued fields contribute to sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Sort by the largest value.
    Max,
}

/// Restricts a sort on a nested field to matching nested elements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NestedSort {
    /// The nested field path.
    pub path: String,
    /// Only nested elements matching this filter are considered.
    pub filter: Query,
}

/// Options of a field sort.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SortOptions {
    /// Multi-value mode.
    pub mode: SortMode,
    /// Sort direction.
    pub order: SortOrder,
    /// Nested element filter.
    pub nested: NestedSort,
}

/// A field sort, serialized as `{field: options}`.
#[derive(Debug, Clone, PartialEq)]
pub struct SortClause {
    /// The field to sort on.
    pub field: String,
    /// The sort options.
    pub options: SortOptions,
}

impl Serialize for SortClause {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        FieldClause::new(self.field.as_str(), &self.options).serialize(serializer)
    }
}

/// A complete search request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryDocument {
    /// The query.
    pub query: Query,
    /// Sort clauses, in priority order.
    pub sort: Vec<SortClause>,
    /// Offset of the first hit.
    pub from: u64,
    /// Number of hits to return.
    pub size: u64,
}

impl QueryDocument {
    /// Returns the top-level bool query.
    pub fn bool_query(&self) -> Option<&BoolQuery> {
        self.query.as_bool()
    }
}
