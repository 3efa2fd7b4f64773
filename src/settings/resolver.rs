//! Settings resolver
//!
//! Turns the supported configuration shapes into canonical
//! [`ConnectionSettings`] records.

use super::types::ConnectionSettings;
use super::uri::{self, parse_uri, UriScheme};
use crate::error::{Error, Result};
use crate::types::{
    ConnectionMode, DriverCapabilities, JsonObject, JsonValue, ReadPreference, DEFAULT_ALIAS,
    DEFAULT_DATABASE, DEFAULT_HOST, DEFAULT_PORT,
};

/// Resolves raw connection configuration into [`ConnectionSettings`]
///
/// The environment flags (test mode, temp-db, preserve) and the driver
/// capabilities are fixed at construction; the connection mode for every
/// alias is derived from them exactly once, here.
#[derive(Debug, Clone)]
pub struct SettingsResolver {
    capabilities: DriverCapabilities,
    testing: bool,
    temp_db: bool,
    preserve: bool,
}

impl SettingsResolver {
    /// Resolver for a non-test environment
    pub fn new(capabilities: DriverCapabilities) -> Self {
        Self {
            capabilities,
            testing: false,
            temp_db: false,
            preserve: false,
        }
    }

    /// Resolver configured from the application config
    pub fn from_config(config: &crate::config::AppConfig) -> Self {
        Self {
            capabilities: DriverCapabilities::detect(),
            testing: config.testing,
            temp_db: config.temp_db,
            preserve: config.preserve_temp_db,
        }
    }

    /// Set test mode
    pub fn testing(mut self, testing: bool) -> Self {
        self.testing = testing;
        self
    }

    /// Set the temp-db flag
    pub fn temp_db(mut self, temp_db: bool) -> Self {
        self.temp_db = temp_db;
        self
    }

    /// Set the preserve flag applied to ephemeral instances
    pub fn preserve(mut self, preserve: bool) -> Self {
        self.preserve = preserve;
        self
    }

    /// Resolve a configuration value into settings records
    ///
    /// Accepts a single mapping or a list of mappings; a single mapping
    /// yields a one-element vector.
    pub fn resolve(&self, config: &JsonValue) -> Result<Vec<ConnectionSettings>> {
        match config {
            JsonValue::Object(map) => Ok(vec![self.resolve_one(map)?]),
            JsonValue::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_object()
                        .ok_or_else(|| {
                            Error::config("each connection settings entry must be a mapping")
                        })
                        .and_then(|map| self.resolve_one(map))
                })
                .collect(),
            _ => Err(Error::config(
                "connection settings must be a mapping or a list of mappings",
            )),
        }
    }

    /// Resolve a single settings mapping
    pub fn resolve_one(&self, map: &JsonObject) -> Result<ConnectionSettings> {
        let mut alias = None;
        let mut host = None;
        let mut port = None;
        let mut database = None;
        let mut username = None;
        let mut password = None;
        let mut auth_source = None;
        let mut replica_set = None;
        let mut read_preference = None;
        let mut preserve = None;

        for (key, value) in map {
            if value.is_null() {
                continue;
            }
            match key.to_ascii_lowercase().as_str() {
                "alias" => alias = Some(expect_str("alias", value)?),
                "host" => host = Some(expect_str("host", value)?),
                "port" => port = Some(expect_port(value)?),
                "db" | "database" | "name" => database = Some(expect_str(key, value)?),
                "username" | "user" => username = Some(expect_str(key, value)?),
                "password" => password = Some(expect_str("password", value)?),
                "replicaset" | "replica_set" => replica_set = Some(expect_str(key, value)?),
                "readpreference" | "read_preference" => {
                    let raw = expect_str(key, value)?;
                    read_preference = Some(ReadPreference::parse(&raw).ok_or_else(|| {
                        Error::config(format!("unknown read preference '{raw}'"))
                    })?);
                }
                "authsource" | "auth_source" | "authentication_source" => {
                    auth_source = Some(expect_str(key, value)?);
                }
                "preserve_temp_db" | "preserve_testdb" => {
                    preserve = Some(expect_bool(key, value)?);
                }
                other => tracing::debug!(key = other, "ignoring unrecognized settings key"),
            }
        }

        // URI-style hosts are dissected into discrete fields. Explicit
        // discrete fields win, except the database name: the URI path wins,
        // matching the driver's own precedence.
        let mut mock_scheme = false;
        let mut kept_uri = None;
        if let Some(raw_host) = &host {
            if uri::is_uri(raw_host) {
                let parsed = parse_uri(raw_host, self.testing)?;
                mock_scheme = parsed.scheme == UriScheme::Mongomock;
                if !mock_scheme {
                    kept_uri = Some(raw_host.clone());
                }
                if parsed.database.is_some() {
                    database = parsed.database;
                }
                username = username.or(parsed.username);
                password = password.or(parsed.password);
                replica_set = replica_set.or(parsed.replica_set);
                read_preference = read_preference.or(parsed.read_preference);
                auth_source = auth_source.or(parsed.auth_source);
                port = port.or(parsed.port);
                host = Some(parsed.host);
            }
        }

        let mode = if self.testing && self.temp_db && !mock_scheme {
            ConnectionMode::Ephemeral
        } else if self.testing && mock_scheme {
            ConnectionMode::Mock
        } else {
            ConnectionMode::Real
        };

        let mut settings =
            ConnectionSettings::new(alias.unwrap_or_else(|| DEFAULT_ALIAS.to_string()));
        settings.host = host.unwrap_or_else(|| DEFAULT_HOST.to_string());
        settings.port = port.unwrap_or(DEFAULT_PORT);
        settings.database = database.unwrap_or_else(|| DEFAULT_DATABASE.to_string());
        settings.username = username;
        settings.password = password;
        settings.auth_source = auth_source;
        settings.replica_set = replica_set;
        settings.read_preference = read_preference.or(if self.capabilities.read_preference {
            Some(ReadPreference::Primary)
        } else {
            None
        });
        settings.uri = kept_uri;
        settings.mode = mode;
        settings.preserve = preserve.unwrap_or(self.preserve);

        Ok(settings)
    }
}

impl Default for SettingsResolver {
    fn default() -> Self {
        Self::new(DriverCapabilities::detect())
    }
}

// ============================================================================
// Typed extraction
// ============================================================================

fn expect_str(key: &str, value: &JsonValue) -> Result<String> {
    value
        .as_str()
        .map(ToString::to_string)
        .ok_or_else(|| Error::config(format!("'{key}' must be a string")))
}

fn expect_port(value: &JsonValue) -> Result<u16> {
    value
        .as_u64()
        .and_then(|p| u16::try_from(p).ok())
        .ok_or_else(|| Error::config("'port' must be a port number"))
}

fn expect_bool(key: &str, value: &JsonValue) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| Error::config(format!("'{key}' must be a boolean")))
}
