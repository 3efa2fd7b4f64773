//! Connection settings resolution
//!
//! Normalizes the supported configuration shapes (flat key-value mapping,
//! nested settings mapping, list of settings mappings) into canonical
//! [`ConnectionSettings`] records, resolving URI-style hosts into discrete
//! fields and the connection mode exactly once per alias.

mod resolver;
mod types;
mod uri;

pub use resolver::SettingsResolver;
pub use types::{ConnectionSettings, SharedSettingsKey};
pub use uri::{parse_uri, ParsedUri, UriScheme};

#[cfg(test)]
mod tests;
