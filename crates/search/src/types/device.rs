//! Inventory-compatible device representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Number;

use super::Scope;

/// The value of a device attribute.
///
/// Single-element arrays are returned as scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// A single string.
    String(String),
    /// A single number.
    Number(Number),
    /// Several strings.
    Strings(Vec<String>),
    /// Several numbers.
    Numbers(Vec<Number>),
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Number(value.into())
    }
}

/// A single device attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceAttribute {
    /// The attribute name.
    pub name: String,
    /// The attribute value.
    pub value: AttributeValue,
    /// The attribute scope.
    pub scope: Scope,
}

impl DeviceAttribute {
    /// Creates a new attribute.
    pub fn new(scope: Scope, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            scope,
        }
    }
}

/// A device as returned by the search API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    /// The device ID.
    pub id: String,

    /// Selected attributes, grouped by scope in decode order.
    pub attributes: Vec<DeviceAttribute>,

    /// Timestamp of the last attribute update, if indexed.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub updated_ts: Option<DateTime<Utc>>,
}

impl Device {
    /// Returns the first attribute with the given scope and name.
    pub fn attribute(&self, scope: Scope, name: &str) -> Option<&DeviceAttribute> {
        self.attributes
            .iter()
            .find(|a| a.scope == scope && a.name == name)
    }
}

/// One page of decoded search results.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DevicePage {
    /// The devices on this page.
    pub devices: Vec<Device>,
    /// Total number of matching devices across all pages.
    pub total: u64,
}
