//! Attribute scopes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The namespace a device attribute belongs to.
///
/// Each scope is stored in its own nested field of the device document,
/// named `{scope}Attributes` (e.g. `inventoryAttributes`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Scope {
    /// Attributes identifying the device (MAC, serial number).
    Identity,
    /// Attributes reported by the device itself.
    Inventory,
    /// Attributes set by users.
    Custom,
}

impl Scope {
    /// Scopes in the order their attributes are reassembled into a device.
    pub const DECODE_ORDER: [Scope; 3] = [Scope::Custom, Scope::Inventory, Scope::Identity];

    /// Returns the scope name as used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Identity => "identity",
            Scope::Inventory => "inventory",
            Scope::Custom => "custom",
        }
    }

    /// Returns the nested document field holding this scope's attributes.
    pub fn attributes_field(&self) -> &'static str {
        match self {
            Scope::Identity => "identityAttributes",
            Scope::Inventory => "inventoryAttributes",
            Scope::Custom => "customAttributes",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "identity" => Ok(Scope::Identity),
            "inventory" => Ok(Scope::Inventory),
            "custom" => Ok(Scope::Custom),
            _ => Err(ValidationError::UnknownScope {
                scope: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Scope {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_parse() {
        assert_eq!("inventory".parse::<Scope>().unwrap(), Scope::Inventory);
        assert_eq!("custom".parse::<Scope>().unwrap(), Scope::Custom);
        assert!(matches!(
            "system".parse::<Scope>(),
            Err(ValidationError::UnknownScope { .. })
        ));
    }

    #[test]
    fn test_attributes_field() {
        assert_eq!(Scope::Custom.attributes_field(), "customAttributes");
        assert_eq!(Scope::Identity.attributes_field(), "identityAttributes");
    }

    #[test]
    fn test_scope_serde() {
        let scope: Scope = serde_json::from_str("\"identity\"").unwrap();
        assert_eq!(scope, Scope::Identity);
        assert_eq!(serde_json::to_string(&scope).unwrap(), "\"identity\"");
        assert!(serde_json::from_str::<Scope>("\"Identity\"").is_err());
    }
}
