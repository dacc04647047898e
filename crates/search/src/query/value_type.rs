//! Maps filter values to the typed attribute field that stores them.

use std::fmt;

use crate::error::{ValidationError, ValidationResult};
use crate::types::TypedValue;

/// The typed value field of a stored attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Keyword values, stored under `.string`.
    String,
    /// Double values, stored under `.numeric`.
    Numeric,
}

impl FieldType {
    /// Both field types, in the order sort clauses are emitted.
    pub const ALL: [FieldType; 2] = [FieldType::String, FieldType::Numeric];

    /// Returns the field name.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Numeric => "numeric",
        }
    }

    /// Returns the full field path within an attribute namespace.
    pub fn path(&self, namespace: &str) -> String {
        format!("{}.{}", namespace, self.as_str())
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a filter value.
///
/// Returns the field the value is matched against and whether the value is
/// an array. Booleans, empty arrays and anything else without a backing
/// field are rejected.
pub fn classify(attribute: &str, value: &TypedValue) -> ValidationResult<(FieldType, bool)> {
    let unsupported = |reason: &str| ValidationError::UnsupportedValueType {
        attribute: attribute.to_string(),
        reason: reason.to_string(),
    };

    match value {
        TypedValue::String(_) => Ok((FieldType::String, false)),
        TypedValue::Number(_) => Ok((FieldType::Numeric, false)),
        TypedValue::StringArray(v) if v.is_empty() => Err(unsupported("array is empty")),
        TypedValue::NumberArray(v) if v.is_empty() => Err(unsupported("array is empty")),
        TypedValue::StringArray(_) => Ok((FieldType::String, true)),
        TypedValue::NumberArray(_) => Ok((FieldType::Numeric, true)),
        TypedValue::Bool(_) => Err(unsupported("booleans are only allowed with $exists")),
    }
}
