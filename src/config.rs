//! Application configuration
//!
//! This module contains the application-level configuration structure and its
//! loaders. The connection-related keys mirror the flat configuration format
//! (`MONGODB_HOST`, `MONGODB_PORT`, ...) as well as the nested
//! `MONGODB_SETTINGS` key holding one settings mapping or a list of them.

use crate::error::{Error, Result};
use crate::types::JsonValue;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// AppConfig
// ============================================================================

/// Application configuration consumed by [`crate::Mongo`]
///
/// The uppercase aliases let the same YAML/JSON document be written in the
/// conventional SHOUTY form. The environment flags are strictly typed: a
/// string such as `"True"` where a boolean is expected is a configuration
/// error, not a truthy value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Test mode: enables mock and ephemeral connections
    #[serde(default, alias = "TESTING")]
    pub testing: bool,

    /// Provision a throwaway local database instance (test mode only)
    #[serde(default, alias = "TEMP_DB")]
    pub temp_db: bool,

    /// Keep the ephemeral instance's data directory on teardown
    #[serde(default, alias = "PRESERVE_TEMP_DB")]
    pub preserve_temp_db: bool,

    /// Connection alias for the flat format
    #[serde(default, alias = "MONGODB_ALIAS")]
    pub mongodb_alias: Option<String>,

    /// Database name for the flat format
    #[serde(default, alias = "MONGODB_DB")]
    pub mongodb_db: Option<String>,

    /// Host (or connection URI) for the flat format
    #[serde(default, alias = "MONGODB_HOST")]
    pub mongodb_host: Option<String>,

    /// Port for the flat format
    #[serde(default, alias = "MONGODB_PORT")]
    pub mongodb_port: Option<u16>,

    /// Username for the flat format
    #[serde(default, alias = "MONGODB_USERNAME")]
    pub mongodb_username: Option<String>,

    /// Password for the flat format
    #[serde(default, alias = "MONGODB_PASSWORD")]
    pub mongodb_password: Option<String>,

    /// Nested settings: one mapping or a list of mappings, overriding the
    /// flat keys entirely when present
    #[serde(default, alias = "MONGODB_SETTINGS")]
    pub mongodb_settings: Option<JsonValue>,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(Error::Io)?;
        Self::from_yaml(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("invalid application config: {e}")))
    }

    /// Load configuration from a JSON value
    pub fn from_value(value: JsonValue) -> Result<Self> {
        serde_json::from_value(value)
            .map_err(|e| Error::config(format!("invalid application config: {e}")))
    }

    /// Load configuration from `MONGODB_*` / `TESTING` / `TEMP_DB`
    /// environment variables
    pub fn from_env() -> Result<Self> {
        let mongodb_port = match std::env::var("MONGODB_PORT") {
            Ok(port) => Some(port.parse::<u16>().map_err(|_| {
                Error::config(format!("MONGODB_PORT is not a port number: {port}"))
            })?),
            Err(_) => None,
        };

        let mongodb_settings = match std::env::var("MONGODB_SETTINGS") {
            Ok(settings) => Some(serde_json::from_str(&settings).map_err(|e| {
                Error::config(format!("MONGODB_SETTINGS is not valid JSON: {e}"))
            })?),
            Err(_) => None,
        };

        Ok(Self {
            testing: env_bool("TESTING")?.unwrap_or(false),
            temp_db: env_bool("TEMP_DB")?.unwrap_or(false),
            preserve_temp_db: env_bool("PRESERVE_TEMP_DB")?.unwrap_or(false),
            mongodb_alias: std::env::var("MONGODB_ALIAS").ok(),
            mongodb_db: std::env::var("MONGODB_DB").ok(),
            mongodb_host: std::env::var("MONGODB_HOST").ok(),
            mongodb_port,
            mongodb_username: std::env::var("MONGODB_USERNAME").ok(),
            mongodb_password: std::env::var("MONGODB_PASSWORD").ok(),
            mongodb_settings,
        })
    }

    /// The raw connection configuration handed to the settings resolver
    ///
    /// `MONGODB_SETTINGS` wins when present; otherwise the flat keys are
    /// assembled into a single mapping.
    pub fn connection_config(&self) -> JsonValue {
        if let Some(settings) = &self.mongodb_settings {
            return settings.clone();
        }

        let mut map = serde_json::Map::new();
        if let Some(alias) = &self.mongodb_alias {
            map.insert("alias".to_string(), JsonValue::from(alias.clone()));
        }
        if let Some(db) = &self.mongodb_db {
            map.insert("db".to_string(), JsonValue::from(db.clone()));
        }
        if let Some(host) = &self.mongodb_host {
            map.insert("host".to_string(), JsonValue::from(host.clone()));
        }
        if let Some(port) = self.mongodb_port {
            map.insert("port".to_string(), JsonValue::from(port));
        }
        if let Some(username) = &self.mongodb_username {
            map.insert("username".to_string(), JsonValue::from(username.clone()));
        }
        if let Some(password) = &self.mongodb_password {
            map.insert("password".to_string(), JsonValue::from(password.clone()));
        }
        JsonValue::Object(map)
    }
}

/// Read an environment variable as a strict boolean
fn env_bool(name: &str) -> Result<Option<bool>> {
    match std::env::var(name) {
        Ok(value) => match value.to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(Some(true)),
            "false" | "0" => Ok(Some(false)),
            _ => Err(Error::config(format!("{name} is not a boolean: {value}"))),
        },
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_flat_yaml() {
        let yaml = r#"
TESTING: true
MONGODB_ALIAS: unittest
MONGODB_HOST: "mongomock://localhost"
"#;
        let config = AppConfig::from_yaml(yaml).unwrap();
        assert!(config.testing);
        assert_eq!(config.mongodb_alias.as_deref(), Some("unittest"));
        assert_eq!(config.mongodb_host.as_deref(), Some("mongomock://localhost"));
    }

    #[test]
    fn test_string_flag_is_rejected() {
        // "True" is a string, not a boolean; strict typing refuses it
        let err = AppConfig::from_yaml("TESTING: \"True\"").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));

        let err = AppConfig::from_value(json!({"TEMP_DB": "True"})).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_connection_config_flat() {
        let config = AppConfig {
            mongodb_host: Some("db.example.com".to_string()),
            mongodb_port: Some(27018),
            mongodb_db: Some("app".to_string()),
            ..AppConfig::default()
        };

        let value = config.connection_config();
        assert_eq!(value["host"], json!("db.example.com"));
        assert_eq!(value["port"], json!(27018));
        assert_eq!(value["db"], json!("app"));
        assert!(value.get("alias").is_none());
    }

    #[test]
    fn test_connection_config_nested_wins() {
        let config = AppConfig {
            mongodb_host: Some("ignored".to_string()),
            mongodb_settings: Some(json!([{"alias": "a"}, {"alias": "b"}])),
            ..AppConfig::default()
        };

        let value = config.connection_config();
        assert!(value.is_array());
        assert_eq!(value.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_lowercase_keys_accepted() {
        let yaml = r#"
testing: true
mongodb_host: localhost
mongodb_port: 27017
"#;
        let config = AppConfig::from_yaml(yaml).unwrap();
        assert!(config.testing);
        assert_eq!(config.mongodb_port, Some(27017));
    }
}
