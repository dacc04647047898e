//! Device search request types.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{FilterPredicate, Scope};
use crate::error::{ValidationError, ValidationResult};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum SortOrder {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

impl SortOrder {
    /// Returns the order as used by the search engine.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(ValidationError::UnknownSortOrder {
                order: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for SortOrder {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Orders results by one attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortCriterion {
    /// The attribute scope.
    pub scope: Scope,
    /// The attribute name.
    pub attribute: String,
    /// The sort direction.
    pub order: SortOrder,
}

impl SortCriterion {
    /// Creates a new sort criterion.
    pub fn new(scope: Scope, attribute: impl Into<String>, order: SortOrder) -> Self {
        Self {
            scope,
            attribute: attribute.into(),
            order,
        }
    }
}

/// An attribute to project into the returned devices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectAttribute {
    /// The attribute scope.
    pub scope: Scope,
    /// The attribute name.
    pub attribute: String,
}

impl SelectAttribute {
    /// Creates a new attribute selection.
    pub fn new(scope: Scope, attribute: impl Into<String>) -> Self {
        Self {
            scope,
            attribute: attribute.into(),
        }
    }
}

/// The set of attributes a search should return.
///
/// An empty selection returns every attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    attributes: HashSet<(Scope, String)>,
}

impl Selection {
    /// Creates a selection that returns every attribute.
    pub fn all() -> Self {
        Self::default()
    }

    /// Returns true if the attribute should be returned.
    pub fn contains(&self, scope: Scope, name: &str) -> bool {
        self.attributes.is_empty() || self.attributes.contains(&(scope, name.to_string()))
    }

    /// Returns true if every attribute is selected.
    pub fn is_all(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl<'a> FromIterator<&'a SelectAttribute> for Selection {
    fn from_iter<I: IntoIterator<Item = &'a SelectAttribute>>(iter: I) -> Self {
        Self {
            attributes: iter
                .into_iter()
                .map(|s| (s.scope, s.attribute.clone()))
                .collect(),
        }
    }
}

/// A device search request.
///
/// `page` and `per_page` must already be normalized by the caller; the
/// query compiler only validates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    /// The 1-based page number.
    #[serde(default)]
    pub page: i64,

    /// The page size.
    #[serde(default)]
    pub per_page: i64,

    /// Filters, all of which must hold.
    #[serde(default)]
    pub filters: Vec<FilterPredicate>,

    /// Sort criteria, in priority order.
    #[serde(default)]
    pub sort: Vec<SortCriterion>,

    /// Attributes to return; empty returns all.
    #[serde(default)]
    pub attributes: Vec<SelectAttribute>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 20,
            filters: Vec::new(),
            sort: Vec::new(),
            attributes: Vec::new(),
        }
    }
}

impl SearchParams {
    /// Creates search parameters for the first page with the given page size.
    pub fn new(per_page: i64) -> Self {
        Self {
            per_page,
            ..Default::default()
        }
    }

    /// Sets the page number.
    pub fn with_page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    /// Adds a filter.
    pub fn with_filter(mut self, filter: FilterPredicate) -> Self {
        self.filters.push(filter);
        self
    }

    /// Adds a sort criterion.
    pub fn with_sort(mut self, sort: SortCriterion) -> Self {
        self.sort.push(sort);
        self
    }

    /// Adds an attribute to the selection.
    pub fn with_attribute(mut self, attribute: SelectAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Returns the attribute selection.
    pub fn selection(&self) -> Selection {
        self.attributes.iter().collect()
    }

    /// Checks the request-level invariants not enforced while deserializing.
    pub fn validate(&self) -> ValidationResult<()> {
        if self.page < 1 {
            return Err(ValidationError::InvalidPaging {
                field: "page",
                value: self.page,
            });
        }
        if self.per_page < 1 {
            return Err(ValidationError::InvalidPaging {
                field: "per_page",
                value: self.per_page,
            });
        }
        if self.sort.iter().any(|s| s.attribute.is_empty()) {
            return Err(ValidationError::MissingRequiredField {
                field: "sort.attribute".to_string(),
            });
        }
        if self.attributes.iter().any(|s| s.attribute.is_empty()) {
            return Err(ValidationError::MissingRequiredField {
                field: "attributes.attribute".to_string(),
            });
        }
        Ok(())
    }
}
