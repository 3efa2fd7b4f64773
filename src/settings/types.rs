//! Connection settings records

use crate::types::{ConnectionMode, ReadPreference, DEFAULT_ALIAS, DEFAULT_DATABASE, DEFAULT_HOST, DEFAULT_PORT};
use serde::{Serialize, Serializer};

// ============================================================================
// ConnectionSettings
// ============================================================================

/// Canonical per-alias connection settings
///
/// The password never leaves through `Debug` or serialization; callers that
/// genuinely need it go through [`ConnectionSettings::password`].
#[derive(Clone, PartialEq, Serialize)]
pub struct ConnectionSettings {
    /// Logical name of this connection target
    pub alias: String,

    /// Host name (never a URI; URI-style hosts are dissected at resolve time)
    pub host: String,

    /// Port
    pub port: u16,

    /// Database name
    pub database: String,

    /// Username
    pub username: Option<String>,

    /// Password, masked on the way out
    #[serde(serialize_with = "mask_secret")]
    pub(crate) password: Option<String>,

    /// Authentication source database
    pub auth_source: Option<String>,

    /// Replica-set name
    pub replica_set: Option<String>,

    /// Read preference, filled only when the driver capability allows it
    pub read_preference: Option<ReadPreference>,

    /// Original connection URI, kept when the host was URI-style so the
    /// driver can re-parse options this resolver does not model
    pub uri: Option<String>,

    /// How the connection is opened, resolved once at settings time
    pub mode: ConnectionMode,

    /// Keep the ephemeral data directory on teardown
    pub preserve: bool,
}

impl ConnectionSettings {
    /// Settings with every default filled in for the given alias
    pub fn new(alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database: DEFAULT_DATABASE.to_string(),
            username: None,
            password: None,
            auth_source: None,
            replica_set: None,
            read_preference: None,
            uri: None,
            mode: ConnectionMode::Real,
            preserve: false,
        }
    }

    /// Settings for the default alias
    pub fn default_alias() -> Self {
        Self::new(DEFAULT_ALIAS)
    }

    /// The password, handed out only on explicit request
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Set the password
    pub fn set_password(&mut self, password: Option<String>) {
        self.password = password;
    }

    /// Key used by the connection-sharing scan
    ///
    /// Excluded on purpose: alias, database, username, password, auth_source
    /// (and the teardown-only preserve flag). Any new settings field must be
    /// deliberately placed on one side of this line.
    pub fn shared_key(&self) -> SharedSettingsKey {
        SharedSettingsKey {
            host: self.host.clone(),
            port: self.port,
            replica_set: self.replica_set.clone(),
            read_preference: self.read_preference,
            mode: self.mode,
        }
    }
}

impl std::fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("alias", &self.alias)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "****"))
            .field("auth_source", &self.auth_source)
            .field("replica_set", &self.replica_set)
            .field("read_preference", &self.read_preference)
            .field("uri", &self.uri)
            .field("mode", &self.mode)
            .field("preserve", &self.preserve)
            .finish()
    }
}

fn mask_secret<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(_) => serializer.serialize_str("****"),
        None => serializer.serialize_none(),
    }
}

// ============================================================================
// SharedSettingsKey
// ============================================================================

/// The fields of [`ConnectionSettings`] that participate in connection
/// sharing: two aliases with equal keys reuse one live handle
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SharedSettingsKey {
    /// Host name
    pub host: String,
    /// Port
    pub port: u16,
    /// Replica-set name
    pub replica_set: Option<String>,
    /// Read preference
    pub read_preference: Option<ReadPreference>,
    /// Connection mode
    pub mode: ConnectionMode,
}
