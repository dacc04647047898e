//! Compiles sort criteria into nested field sorts.

use crate::types::SortCriterion;

use super::dsl::{FieldClause, NestedSort, Query, SortClause, SortMode, SortOptions};
use super::value_type::FieldType;

/// Compiles sort criteria, in priority order.
///
/// The stored type of an attribute is not known up front, so each criterion
/// sorts on both typed fields: string first, then numeric. Only the nested
/// element whose name matches the attribute takes part in the sort.
pub fn compile_sort(criteria: &[SortCriterion]) -> Vec<SortClause> {
    criteria
        .iter()
        .flat_map(|criterion| {
            let namespace = criterion.scope.attributes_field();
            FieldType::ALL.into_iter().map(move |field| SortClause {
                field: field.path(namespace),
                options: SortOptions {
                    mode: SortMode::Max,
                    order: criterion.order,
                    nested: NestedSort {
                        path: namespace.to_string(),
                        filter: Query::Term(FieldClause::new(
                            format!("{}.name", namespace),
                            criterion.attribute.clone(),
                        )),
                    },
                },
            })
        })
        .collect()
}
