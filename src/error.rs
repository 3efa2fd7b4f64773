//! Error types for mongoduct
//!
//! This module defines the error hierarchy for the entire toolkit.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for mongoduct
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid connection URI '{uri}': {message}")]
    InvalidUri { uri: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Connection Errors
    // ============================================================================
    #[error("Connection with alias \"{alias}\" has not been defined")]
    AliasNotDefined { alias: String },

    #[error("You have not defined a default connection")]
    DefaultAliasNotDefined,

    #[error("Connection error: {message}")]
    Connection { message: String },

    #[error("Driver error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("Mock connections requested but the `mock` feature is not enabled")]
    MockUnavailable,

    // ============================================================================
    // Form Errors
    // ============================================================================
    #[error("Form binding error: {message}")]
    Form { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid URI error
    pub fn invalid_uri(uri: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidUri {
            uri: uri.into(),
            message: message.into(),
        }
    }

    /// Create a connection error
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create an alias-not-defined error, with a friendlier message for the
    /// default alias
    pub fn alias_not_defined(alias: impl Into<String>) -> Self {
        let alias = alias.into();
        if alias == crate::types::DEFAULT_ALIAS {
            Self::DefaultAliasNotDefined
        } else {
            Self::AliasNotDefined { alias }
        }
    }

    /// Create a form binding error
    pub fn form(message: impl Into<String>) -> Self {
        Self::Form {
            message: message.into(),
        }
    }

    /// Check if this error is a URI parsing failure
    pub fn is_invalid_uri(&self) -> bool {
        matches!(self, Error::InvalidUri { .. })
    }

    /// Check if this error is a connection failure
    pub fn is_connection(&self) -> bool {
        matches!(
            self,
            Error::Connection { .. }
                | Error::AliasNotDefined { .. }
                | Error::DefaultAliasNotDefined
                | Error::Mongo(_)
        )
    }
}

/// Result type alias for mongoduct
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::invalid_uri("mongo://localhost", "unrecognized scheme");
        assert_eq!(
            err.to_string(),
            "Invalid connection URI 'mongo://localhost': unrecognized scheme"
        );

        let err = Error::alias_not_defined("reporting");
        assert_eq!(
            err.to_string(),
            "Connection with alias \"reporting\" has not been defined"
        );
    }

    #[test]
    fn test_default_alias_message() {
        let err = Error::alias_not_defined(crate::types::DEFAULT_ALIAS);
        assert_eq!(err.to_string(), "You have not defined a default connection");
        assert!(err.is_connection());
    }

    #[test]
    fn test_error_predicates() {
        assert!(Error::invalid_uri("x://y", "bad").is_invalid_uri());
        assert!(!Error::config("nope").is_invalid_uri());
        assert!(Error::connection("refused").is_connection());
        assert!(!Error::config("nope").is_connection());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
