//! Compiles filter predicates into nested attribute queries.
//!
//! Every predicate becomes a `nested` query over its scope's attribute
//! namespace, so the name match and the value match are evaluated against
//! the same attribute object:
//!
//! ```json
//! {
//!   "nested": {
//!     "path": "inventoryAttributes",
//!     "query": {
//!       "bool": {
//!         "must": [
//!           { "match": { "inventoryAttributes.name": "status" } },
//!           { "match": { "inventoryAttributes.string": "accepted" } }
//!         ]
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! Negative operators (`$ne`, `$nin`, `$exists: false`) produce the same
//! query as their positive counterpart and are placed in the top-level
//! `must_not` branch instead of being negated inline.

use crate::error::{ValidationError, ValidationResult};
use crate::types::{FilterPredicate, Operator, TypedValue};

use super::dsl::{BoolQuery, ExistsClause, FieldClause, NestedQuery, Query, RangeClause, RangeOp};
use super::value_type::{FieldType, classify};

/// The top-level bool branch a compiled filter belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    /// The filter must match.
    Must,
    /// The filter must not match.
    MustNot,
}

/// A compiled filter and the branch it contributes to.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledFilter {
    /// Where the query goes in the top-level bool query.
    pub branch: Branch,
    /// The nested attribute query.
    pub query: Query,
}

impl CompiledFilter {
    fn new(branch: Branch, namespace: &str, inner: BoolQuery) -> Self {
        Self {
            branch,
            query: Query::Nested(NestedQuery::new(namespace, inner)),
        }
    }
}

/// Compiles a single filter predicate.
pub fn compile_filter(filter: &FilterPredicate) -> ValidationResult<CompiledFilter> {
    let namespace = filter.scope.attributes_field();
    let name_match = Query::Match(FieldClause::new(
        format!("{}.name", namespace),
        TypedValue::String(filter.attribute.clone()),
    ));

    let invalid_shape = |expected: &'static str| ValidationError::InvalidValueShape {
        scope: filter.scope,
        attribute: filter.attribute.clone(),
        operator: filter.operator,
        expected,
    };

    let compiled = match filter.operator {
        Operator::Eq | Operator::Ne => {
            let (field, is_array) = classify(&filter.attribute, &filter.value)?;
            if is_array {
                return Err(invalid_shape("a scalar value"));
            }
            let value_match = Query::Match(FieldClause::new(
                field.path(namespace),
                filter.value.clone(),
            ));
            let branch = if filter.operator == Operator::Eq {
                Branch::Must
            } else {
                Branch::MustNot
            };
            CompiledFilter::new(
                branch,
                namespace,
                BoolQuery::must(vec![name_match, value_match]),
            )
        }
        Operator::Regex => {
            let TypedValue::String(pattern) = &filter.value else {
                return Err(invalid_shape("a string value"));
            };
            let regexp = Query::Regexp(FieldClause::new(
                FieldType::String.path(namespace),
                pattern.clone(),
            ));
            CompiledFilter::new(
                Branch::Must,
                namespace,
                BoolQuery::must(vec![name_match, regexp]),
            )
        }
        Operator::In | Operator::Nin => {
            let (field, is_array) = classify(&filter.attribute, &filter.value)?;
            if !is_array {
                return Err(invalid_shape("an array value"));
            }
            let terms = Query::Terms(FieldClause::new(
                field.path(namespace),
                filter.value.clone(),
            ));
            let branch = if filter.operator == Operator::In {
                Branch::Must
            } else {
                Branch::MustNot
            };
            CompiledFilter::new(branch, namespace, BoolQuery::must(vec![name_match, terms]))
        }
        Operator::Exists => {
            let TypedValue::Bool(present) = filter.value else {
                return Err(invalid_shape("a boolean value"));
            };
            // the value lives in either typed field depending on the attribute's type
            let inner = BoolQuery {
                must: vec![name_match],
                should: FieldType::ALL
                    .into_iter()
                    .map(|field| {
                        Query::Exists(ExistsClause {
                            field: field.path(namespace),
                        })
                    })
                    .collect(),
                minimum_should_match: Some(1),
                ..Default::default()
            };
            let branch = if present {
                Branch::Must
            } else {
                Branch::MustNot
            };
            CompiledFilter::new(branch, namespace, inner)
        }
        Operator::Gt | Operator::Gte | Operator::Lt | Operator::Lte => {
            let Some(op) = RangeOp::from_operator(filter.operator) else {
                return Err(ValidationError::UnknownOperator {
                    operator: filter.operator.to_string(),
                });
            };
            let (field, is_array) = classify(&filter.attribute, &filter.value)?;
            if is_array {
                return Err(invalid_shape("a scalar value"));
            }
            let range = Query::Range(RangeClause {
                field: field.path(namespace),
                op,
                value: filter.value.clone(),
            });
            CompiledFilter::new(Branch::Must, namespace, BoolQuery::must(vec![name_match, range]))
        }
    };

    Ok(compiled)
}
