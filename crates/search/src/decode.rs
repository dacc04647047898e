//! Decodes search responses into devices.
//!
//! Each hit `_source` carries one array of stored attributes per scope.
//! A stored attribute keeps its value in a typed field:
//!
//! ```json
//! { "name": "cpu_count", "numeric": [4] }
//! { "name": "hostname", "string": ["gateway"] }
//! ```
//!
//! The decoder walks the scopes in a fixed order, drops attributes that are
//! not selected and turns single-element arrays back into scalars.

use chrono::{DateTime, Utc};
use serde_json::{Map, Number, Value};
use tracing::warn;

use crate::error::{TranslationError, TranslationResult};
use crate::types::{AttributeValue, Device, DeviceAttribute, DevicePage, Scope, Selection};

/// Decodes a raw search response into a page of devices.
pub fn decode_search_response(
    response: &Value,
    selection: &Selection,
) -> TranslationResult<DevicePage> {
    let hits = response
        .get("hits")
        .ok_or_else(|| missing("hits"))?;

    let total = hits
        .get("total")
        .and_then(|t| t.get("value"))
        .ok_or_else(|| missing("hits.total.value"))?
        .as_u64()
        .ok_or_else(|| unexpected("hits.total.value", "a non-negative integer"))?;

    let devices = hits
        .get("hits")
        .ok_or_else(|| missing("hits.hits"))?
        .as_array()
        .ok_or_else(|| unexpected("hits.hits", "an array"))?
        .iter()
        .map(|hit| decode_hit(hit, selection))
        .collect::<TranslationResult<Vec<_>>>()?;

    Ok(DevicePage { devices, total })
}

/// Decodes a single hit into a device.
///
/// Devices without any selected attribute are still returned.
pub fn decode_hit(hit: &Value, selection: &Selection) -> TranslationResult<Device> {
    let source = hit.get("_source").ok_or_else(|| missing("_source"))?;

    let id = source
        .get("id")
        .ok_or_else(|| missing("_source.id"))?
        .as_str()
        .ok_or_else(|| unexpected("_source.id", "a string"))?
        .to_string();

    let mut attributes = Vec::new();
    for scope in Scope::DECODE_ORDER {
        decode_scope(source, scope, selection, &mut attributes)?;
    }

    Ok(Device {
        id,
        attributes,
        updated_ts: decode_updated_ts(source),
    })
}

fn decode_scope(
    source: &Value,
    scope: Scope,
    selection: &Selection,
    out: &mut Vec<DeviceAttribute>,
) -> TranslationResult<()> {
    let field = scope.attributes_field();
    let stored = match source.get(field) {
        None | Some(Value::Null) => return Ok(()),
        Some(Value::Array(stored)) => stored,
        Some(_) => return Err(unexpected(&format!("_source.{}", field), "an array")),
    };

    for (index, entry) in stored.iter().enumerate() {
        let malformed = |message: &str| TranslationError::MalformedAttribute {
            scope,
            index,
            message: message.to_string(),
        };

        let entry = entry
            .as_object()
            .ok_or_else(|| malformed("entry is not an object"))?;
        let name = entry
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| malformed("missing attribute name"))?;

        if !selection.contains(scope, name) {
            continue;
        }

        match stored_value(entry, scope, name).map_err(|m| malformed(&m))? {
            Some(value) => out.push(DeviceAttribute::new(scope, name, value)),
            None => warn!(
                scope = %scope,
                attribute = name,
                "Stored attribute has no value, skipping"
            ),
        }
    }

    Ok(())
}

/// Picks the value of a stored attribute. Numeric values take precedence
/// over string values.
fn stored_value(
    entry: &Map<String, Value>,
    scope: Scope,
    name: &str,
) -> Result<Option<AttributeValue>, String> {
    let numeric = numeric_value(entry.get("numeric"))?;
    let string = string_value(entry.get("string"))?;

    match (numeric, string) {
        (Some(numeric), Some(_)) => {
            warn!(
                scope = %scope,
                attribute = name,
                "Stored attribute has both numeric and string values, using numeric"
            );
            Ok(Some(numeric))
        }
        (Some(numeric), None) => Ok(Some(numeric)),
        (None, string) => Ok(string),
    }
}

fn numeric_value(field: Option<&Value>) -> Result<Option<AttributeValue>, String> {
    match field {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(Some(AttributeValue::Number(n.clone()))),
        Some(Value::Array(items)) => {
            let mut numbers: Vec<Number> = items
                .iter()
                .map(|v| match v {
                    Value::Number(n) => Ok(n.clone()),
                    _ => Err("numeric field holds a non-numeric value".to_string()),
                })
                .collect::<Result<_, _>>()?;
            Ok(match numbers.len() {
                0 => None,
                1 => numbers.pop().map(AttributeValue::Number),
                _ => Some(AttributeValue::Numbers(numbers)),
            })
        }
        Some(_) => Err("numeric field is neither a number nor an array".to_string()),
    }
}

fn string_value(field: Option<&Value>) -> Result<Option<AttributeValue>, String> {
    match field {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(AttributeValue::String(s.clone()))),
        Some(Value::Array(items)) => {
            let mut strings: Vec<String> = items
                .iter()
                .map(|v| match v {
                    Value::String(s) => Ok(s.clone()),
                    _ => Err("string field holds a non-string value".to_string()),
                })
                .collect::<Result<_, _>>()?;
            Ok(match strings.len() {
                0 => None,
                1 => strings.pop().map(AttributeValue::String),
                _ => Some(AttributeValue::Strings(strings)),
            })
        }
        Some(_) => Err("string field is neither a string nor an array".to_string()),
    }
}

fn decode_updated_ts(source: &Value) -> Option<DateTime<Utc>> {
    let raw = source.get("updatedAt")?.as_str()?;
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => Some(ts.with_timezone(&Utc)),
        Err(e) => {
            warn!(error = %e, "Ignoring unparseable updatedAt timestamp");
            None
        }
    }
}

fn missing(field: &str) -> TranslationError {
    TranslationError::MissingField {
        field: field.to_string(),
    }
}

fn unexpected(field: &str, expected: &'static str) -> TranslationError {
    TranslationError::UnexpectedType {
        field: field.to_string(),
        expected,
    }
}
