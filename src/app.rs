//! Application context
//!
//! The [`Mongo`] object is the application-facing entry point: built once
//! from an [`AppConfig`], it resolves and registers every configured alias
//! and hands out connections on demand. It owns the registry, so dropping it
//! releases every handle and any ephemeral instance — there is no hidden
//! process-wide state.

use crate::config::AppConfig;
use crate::error::Result;
use crate::handle::ConnectionHandle;
use crate::registry::ConnectionRegistry;
use crate::settings::SettingsResolver;
use crate::types::DEFAULT_ALIAS;

/// Application-owned connection context
#[derive(Debug, Clone)]
pub struct Mongo {
    registry: ConnectionRegistry,
}

impl Mongo {
    /// Resolve the configuration and register every alias it defines
    ///
    /// No connection is opened here; handles open on first acquisition.
    pub async fn new(config: &AppConfig) -> Result<Self> {
        let resolver = SettingsResolver::from_config(config);
        let registry = ConnectionRegistry::new();
        for settings in resolver.resolve(&config.connection_config())? {
            registry.register(settings).await?;
        }
        Ok(Self { registry })
    }

    /// The underlying registry
    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    /// Acquire the connection for an alias
    pub async fn connection(&self, alias: &str) -> Result<ConnectionHandle> {
        self.registry.get_or_create(alias).await
    }

    /// Acquire the default connection
    pub async fn default_connection(&self) -> Result<ConnectionHandle> {
        self.connection(DEFAULT_ALIAS).await
    }

    /// Disconnect an alias; returns whether it was registered
    pub async fn disconnect(&self, alias: &str) -> Result<bool> {
        self.registry.disconnect(alias).await
    }

    /// Disconnect every alias
    pub async fn disconnect_all(&self) -> Result<()> {
        self.registry.disconnect_all().await
    }
}
