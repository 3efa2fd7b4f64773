//! Connection URI parsing
//!
//! Dissects URI-style host strings into discrete connection fields. Only the
//! schemes the driver (or the mock layer, in test mode) understands are
//! accepted; anything else is an [`Error::InvalidUri`].

use crate::error::{Error, Result};
use crate::types::ReadPreference;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use url::Url;

/// Recognized URI schemes, mapped to whether they are valid outside test mode
static RECOGNIZED_SCHEMES: Lazy<HashMap<&'static str, bool>> = Lazy::new(|| {
    HashMap::from([
        ("mongodb", true),
        ("mongodb+srv", true),
        ("mongomock", false),
    ])
});

// ============================================================================
// Types
// ============================================================================

/// Scheme of a recognized connection URI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UriScheme {
    /// Plain driver connection
    Mongodb,
    /// DNS seed-list connection
    MongodbSrv,
    /// In-memory mock connection (test mode only)
    Mongomock,
}

impl UriScheme {
    fn from_str(scheme: &str) -> Option<Self> {
        match scheme {
            "mongodb" => Some(Self::Mongodb),
            "mongodb+srv" => Some(Self::MongodbSrv),
            "mongomock" => Some(Self::Mongomock),
            _ => None,
        }
    }
}

/// Discrete fields extracted from a connection URI
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedUri {
    /// Recognized scheme
    pub scheme: UriScheme,
    /// Host name
    pub host: String,
    /// Port, absent for seed-list URIs
    pub port: Option<u16>,
    /// Embedded username
    pub username: Option<String>,
    /// Embedded password
    pub password: Option<String>,
    /// Database name from the URI path
    pub database: Option<String>,
    /// `replicaSet` query option
    pub replica_set: Option<String>,
    /// `readPreference` query option
    pub read_preference: Option<ReadPreference>,
    /// `authSource` query option
    pub auth_source: Option<String>,
}

// ============================================================================
// Parsing
// ============================================================================

/// Whether a host string is URI-style at all
pub(crate) fn is_uri(host: &str) -> bool {
    host.contains("://")
}

/// Parse a connection URI into discrete fields
///
/// `testing` gates the test-only schemes: outside test mode `mongomock://`
/// is as unrecognized as any other unknown scheme, so a malformed or
/// disallowed URI fails identically in every mode.
pub fn parse_uri(uri: &str, testing: bool) -> Result<ParsedUri> {
    let scheme = uri.split("://").next().unwrap_or_default();
    match RECOGNIZED_SCHEMES.get(scheme).copied() {
        None => {
            return Err(Error::invalid_uri(
                uri,
                format!("unrecognized scheme '{scheme}'"),
            ))
        }
        Some(true) => {}
        Some(false) if testing => {}
        Some(false) => {
            return Err(Error::invalid_uri(
                uri,
                format!("scheme '{scheme}' is only available in test mode"),
            ))
        }
    }

    let parsed = Url::parse(uri).map_err(|e| Error::invalid_uri(uri, e.to_string()))?;

    let host = parsed
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| Error::invalid_uri(uri, "missing host"))?
        .to_string();

    // The scheme survived the table lookup above
    let scheme = UriScheme::from_str(parsed.scheme())
        .ok_or_else(|| Error::invalid_uri(uri, "unrecognized scheme"))?;

    if scheme == UriScheme::MongodbSrv && parsed.port().is_some() {
        return Err(Error::invalid_uri(uri, "seed-list URIs take no port"));
    }

    let username = Some(parsed.username().to_string()).filter(|u| !u.is_empty());
    let password = parsed.password().map(ToString::to_string);

    let database = Some(parsed.path().trim_start_matches('/').to_string())
        .filter(|d| !d.is_empty());

    let mut replica_set = None;
    let mut read_preference = None;
    let mut auth_source = None;
    for (key, value) in parsed.query_pairs() {
        match key.to_ascii_lowercase().as_str() {
            "replicaset" => replica_set = Some(value.to_string()),
            "readpreference" => {
                read_preference = Some(ReadPreference::parse(&value).ok_or_else(|| {
                    Error::invalid_uri(uri, format!("unknown read preference '{value}'"))
                })?);
            }
            "authsource" => auth_source = Some(value.to_string()),
            // Remaining options are the driver's business; for real
            // connections the original URI is re-parsed by the driver.
            _ => {}
        }
    }

    Ok(ParsedUri {
        scheme,
        host,
        port: parsed.port(),
        username,
        password,
        database,
        replica_set,
        read_preference,
        auth_source,
    })
}
