//! Filter predicate types.
//!
//! A filter predicate selects devices by one attribute: its scope, its name,
//! an operator and a typed value. Predicates arrive as JSON and are validated
//! while deserializing, so a [`FilterPredicate`] always holds a known scope,
//! a known operator and a value of one of the supported shapes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Number, Value};

use super::Scope;
use crate::error::ValidationError;

/// Filter operators.
///
/// On the wire operators carry a `$` prefix (`"$eq"`, `"$nin"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Attribute equals the value.
    Eq,
    /// Attribute does not equal the value.
    Ne,
    /// Attribute matches a regular expression (string attributes only).
    Regex,
    /// Attribute equals one of the values.
    In,
    /// Attribute equals none of the values.
    Nin,
    /// Attribute is (or is not) present.
    Exists,
    /// Attribute is greater than the value.
    Gt,
    /// Attribute is greater than or equal to the value.
    Gte,
    /// Attribute is less than the value.
    Lt,
    /// Attribute is less than or equal to the value.
    Lte,
}

impl Operator {
    /// Returns the operator as used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "$eq",
            Operator::Ne => "$ne",
            Operator::Regex => "$regex",
            Operator::In => "$in",
            Operator::Nin => "$nin",
            Operator::Exists => "$exists",
            Operator::Gt => "$gt",
            Operator::Gte => "$gte",
            Operator::Lt => "$lt",
            Operator::Lte => "$lte",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "$eq" => Ok(Operator::Eq),
            "$ne" => Ok(Operator::Ne),
            "$regex" => Ok(Operator::Regex),
            "$in" => Ok(Operator::In),
            "$nin" => Ok(Operator::Nin),
            "$exists" => Ok(Operator::Exists),
            "$gt" => Ok(Operator::Gt),
            "$gte" => Ok(Operator::Gte),
            "$lt" => Ok(Operator::Lt),
            "$lte" => Ok(Operator::Lte),
            _ => Err(ValidationError::UnknownOperator {
                operator: s.to_string(),
            }),
        }
    }
}

impl Serialize for Operator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A filter value.
///
/// Only strings, numbers, homogeneous arrays of either, and booleans are
/// representable. Numbers keep their JSON literal so integer attributes are
/// matched as integers.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    /// A single string.
    String(String),
    /// A single number.
    Number(Number),
    /// An array of strings.
    StringArray(Vec<String>),
    /// An array of numbers.
    NumberArray(Vec<Number>),
    /// A boolean, only meaningful for `$exists`.
    Bool(bool),
}

impl TypedValue {
    /// Converts a JSON value into a typed value.
    ///
    /// `attribute` is only used for error reporting. An empty array is
    /// accepted here as an empty string array; operators that need a
    /// non-empty array reject it when the predicate is compiled.
    pub fn from_json(attribute: &str, value: Value) -> Result<Self, ValidationError> {
        let unsupported = |reason: &str| ValidationError::UnsupportedValueType {
            attribute: attribute.to_string(),
            reason: reason.to_string(),
        };

        match value {
            Value::String(s) => Ok(TypedValue::String(s)),
            Value::Number(n) => Ok(TypedValue::Number(n)),
            Value::Bool(b) => Ok(TypedValue::Bool(b)),
            Value::Array(items) => match items.first() {
                None => Ok(TypedValue::StringArray(Vec::new())),
                Some(Value::String(_)) => items
                    .into_iter()
                    .map(|item| match item {
                        Value::String(s) => Ok(s),
                        _ => Err(unsupported("array mixes strings with other values")),
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map(TypedValue::StringArray),
                Some(Value::Number(_)) => items
                    .into_iter()
                    .map(|item| match item {
                        Value::Number(n) => Ok(n),
                        _ => Err(unsupported("array mixes numbers with other values")),
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map(TypedValue::NumberArray),
                Some(_) => Err(unsupported(
                    "array elements must be strings or numbers",
                )),
            },
            Value::Null => Err(unsupported("value is null")),
            Value::Object(_) => Err(unsupported("objects are not allowed")),
        }
    }
}

impl Serialize for TypedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TypedValue::String(s) => s.serialize(serializer),
            TypedValue::Number(n) => n.serialize(serializer),
            TypedValue::StringArray(v) => v.serialize(serializer),
            TypedValue::NumberArray(v) => v.serialize(serializer),
            TypedValue::Bool(b) => b.serialize(serializer),
        }
    }
}

impl From<&str> for TypedValue {
    fn from(value: &str) -> Self {
        TypedValue::String(value.to_string())
    }
}

impl From<String> for TypedValue {
    fn from(value: String) -> Self {
        TypedValue::String(value)
    }
}

impl From<i64> for TypedValue {
    fn from(value: i64) -> Self {
        TypedValue::Number(value.into())
    }
}

impl From<bool> for TypedValue {
    fn from(value: bool) -> Self {
        TypedValue::Bool(value)
    }
}

/// A single attribute filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFilterPredicate")]
pub struct FilterPredicate {
    /// The attribute scope.
    pub scope: Scope,
    /// The attribute name.
    pub attribute: String,
    /// The comparison operator.
    #[serde(rename = "type")]
    pub operator: Operator,
    /// The value to compare against.
    pub value: TypedValue,
}

impl FilterPredicate {
    /// Creates a new filter predicate.
    pub fn new(
        scope: Scope,
        attribute: impl Into<String>,
        operator: Operator,
        value: impl Into<TypedValue>,
    ) -> Self {
        Self {
            scope,
            attribute: attribute.into(),
            operator,
            value: value.into(),
        }
    }
}

/// Wire form of a filter predicate before validation.
#[derive(Debug, Deserialize)]
struct RawFilterPredicate {
    scope: String,
    attribute: String,
    #[serde(rename = "type")]
    operator: String,
    #[serde(default)]
    value: Value,
}

impl TryFrom<RawFilterPredicate> for FilterPredicate {
    type Error = ValidationError;

    fn try_from(raw: RawFilterPredicate) -> Result<Self, Self::Error> {
        if raw.attribute.is_empty() {
            return Err(ValidationError::MissingRequiredField {
                field: "filters.attribute".to_string(),
            });
        }
        let scope = raw.scope.parse()?;
        let operator = raw.operator.parse()?;
        let value = TypedValue::from_json(&raw.attribute, raw.value)?;

        Ok(Self {
            scope,
            attribute: raw.attribute,
            operator,
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operator_parse() {
        assert_eq!("$nin".parse::<Operator>().unwrap(), Operator::Nin);
        assert_eq!("$lte".parse::<Operator>().unwrap(), Operator::Lte);
        assert!(matches!(
            "eq".parse::<Operator>(),
            Err(ValidationError::UnknownOperator { .. })
        ));
    }

    #[test]
    fn test_typed_value_from_json() {
        assert_eq!(
            TypedValue::from_json("a", json!("x")).unwrap(),
            TypedValue::String("x".to_string())
        );
        assert_eq!(
            TypedValue::from_json("a", json!([1, 2.5])).unwrap(),
            TypedValue::NumberArray(vec![Number::from(1u64), Number::from_f64(2.5).unwrap()])
        );
        assert_eq!(
            TypedValue::from_json("a", json!(true)).unwrap(),
            TypedValue::Bool(true)
        );
    }

    #[test]
    fn test_typed_value_rejects_mixed_array() {
        let err = TypedValue::from_json("mac", json!(["a", 1])).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::UnsupportedValueType { ref attribute, .. } if attribute == "mac"
        ));
    }

    #[test]
    fn test_typed_value_rejects_other_shapes() {
        assert!(TypedValue::from_json("a", json!(null)).is_err());
        assert!(TypedValue::from_json("a", json!({"k": "v"})).is_err());
        assert!(TypedValue::from_json("a", json!([true])).is_err());
        assert!(TypedValue::from_json("a", json!([["nested"]])).is_err());
    }

    #[test]
    fn test_typed_value_keeps_integer_literal() {
        let value = TypedValue::from_json("a", json!(42)).unwrap();
        assert_eq!(serde_json::to_string(&value).unwrap(), "42");
    }

    #[test]
    fn test_predicate_deserialize() {
        let predicate: FilterPredicate = serde_json::from_value(json!({
            "scope": "inventory",
            "attribute": "status",
            "type": "$eq",
            "value": "accepted"
        }))
        .unwrap();

        assert_eq!(
            predicate,
            FilterPredicate::new(Scope::Inventory, "status", Operator::Eq, "accepted")
        );
    }

    #[test]
    fn test_predicate_deserialize_unknown_operator() {
        let result = serde_json::from_value::<FilterPredicate>(json!({
            "scope": "inventory",
            "attribute": "status",
            "type": "$like",
            "value": "accepted"
        }));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("unknown filter operator: $like"));
    }

    #[test]
    fn test_predicate_deserialize_missing_value() {
        let result = serde_json::from_value::<FilterPredicate>(json!({
            "scope": "custom",
            "attribute": "tag",
            "type": "$eq"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_predicate_serialize() {
        let predicate = FilterPredicate::new(Scope::Custom, "tag", Operator::Exists, true);
        assert_eq!(
            serde_json::to_value(&predicate).unwrap(),
            json!({"scope": "custom", "attribute": "tag", "type": "$exists", "value": true})
        );
    }
}
