//! Common types used throughout mongoduct
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// BSON document type (re-exported from the driver)
pub type Document = mongodb::bson::Document;

// ============================================================================
// Constants
// ============================================================================

/// Alias used when the configuration names no alias of its own
pub const DEFAULT_ALIAS: &str = "default";

/// Default host for connections with no host configured
pub const DEFAULT_HOST: &str = "localhost";

/// Default MongoDB production port
pub const DEFAULT_PORT: u16 = 27017;

/// Default database name
pub const DEFAULT_DATABASE: &str = "test";

// ============================================================================
// Connection Mode
// ============================================================================

/// How a connection for an alias is opened
///
/// Resolved exactly once per alias by the settings resolver; the registry
/// only matches on the stored value and never re-derives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionMode {
    /// Real driver connection against the configured target
    #[default]
    Real,
    /// In-memory mock client (test mode, `mongomock://` host)
    Mock,
    /// Throwaway local `mongod` instance (test mode, temp-db flag)
    Ephemeral,
}

// ============================================================================
// Read Preference
// ============================================================================

/// Replica-set read preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReadPreference {
    /// Read from the primary only
    #[default]
    Primary,
    /// Prefer the primary, fall back to a secondary
    PrimaryPreferred,
    /// Read from a secondary only
    Secondary,
    /// Prefer a secondary, fall back to the primary
    SecondaryPreferred,
    /// Read from the lowest-latency member
    Nearest,
}

impl ReadPreference {
    /// Parse a read preference from its URI option spelling
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "primary" => Some(Self::Primary),
            "primarypreferred" => Some(Self::PrimaryPreferred),
            "secondary" => Some(Self::Secondary),
            "secondarypreferred" => Some(Self::SecondaryPreferred),
            "nearest" => Some(Self::Nearest),
            _ => None,
        }
    }
}

impl From<ReadPreference> for mongodb::options::ReadPreference {
    fn from(pref: ReadPreference) -> Self {
        match pref {
            ReadPreference::Primary => mongodb::options::ReadPreference::Primary,
            ReadPreference::PrimaryPreferred => {
                mongodb::options::ReadPreference::PrimaryPreferred {
                    options: Default::default(),
                }
            }
            ReadPreference::Secondary => mongodb::options::ReadPreference::Secondary {
                options: Default::default(),
            },
            ReadPreference::SecondaryPreferred => {
                mongodb::options::ReadPreference::SecondaryPreferred {
                    options: Default::default(),
                }
            }
            ReadPreference::Nearest => mongodb::options::ReadPreference::Nearest {
                options: Default::default(),
            },
        }
    }
}

// ============================================================================
// Driver Capabilities
// ============================================================================

/// Capabilities of the underlying driver, resolved once at startup
///
/// Passed through configuration instead of being re-checked on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverCapabilities {
    /// Whether the driver honors a per-connection read preference
    pub read_preference: bool,
}

impl DriverCapabilities {
    /// Capabilities of the driver this crate links against
    pub fn detect() -> Self {
        Self {
            read_preference: true,
        }
    }
}

impl Default for DriverCapabilities {
    fn default() -> Self {
        Self::detect()
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_empty(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_preference_parse() {
        assert_eq!(ReadPreference::parse("primary"), Some(ReadPreference::Primary));
        assert_eq!(
            ReadPreference::parse("secondaryPreferred"),
            Some(ReadPreference::SecondaryPreferred)
        );
        assert_eq!(ReadPreference::parse("NEAREST"), Some(ReadPreference::Nearest));
        assert_eq!(ReadPreference::parse("eventual"), None);
    }

    #[test]
    fn test_read_preference_serde() {
        let pref: ReadPreference = serde_json::from_str("\"primaryPreferred\"").unwrap();
        assert_eq!(pref, ReadPreference::PrimaryPreferred);

        let json = serde_json::to_string(&ReadPreference::Primary).unwrap();
        assert_eq!(json, "\"primary\"");
    }

    #[test]
    fn test_connection_mode_default() {
        assert_eq!(ConnectionMode::default(), ConnectionMode::Real);
    }

    #[test]
    fn test_driver_capabilities() {
        assert!(DriverCapabilities::detect().read_preference);
        assert_eq!(DriverCapabilities::default(), DriverCapabilities::detect());
    }

    #[test]
    fn test_option_string_none_if_empty() {
        assert_eq!(
            Some("test".to_string()).none_if_empty(),
            Some("test".to_string())
        );
        assert_eq!(Some(String::new()).none_if_empty(), None);
        assert_eq!(None::<String>.none_if_empty(), None);
        assert_eq!("test".to_string().none_if_empty(), Some("test".to_string()));
        assert_eq!(String::new().none_if_empty(), None);
    }
}
