//! Connection registry implementation

use super::types::RegistryEntry;
use crate::ephemeral::EphemeralMongo;
use crate::error::{Error, Result};
use crate::handle::ConnectionHandle;
use crate::settings::ConnectionSettings;
use crate::types::ConnectionMode;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Registry of configured connections, keyed by alias
///
/// Acquisition and disconnect take the map's write lock, so "at most one
/// live handle per alias, with sharing across equal settings" holds under
/// concurrent access. The registry also owns the single ephemeral instance
/// its test-mode aliases may need; dropping the registry (or disconnecting
/// the last ephemeral consumer) tears it down.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    entries: Arc<RwLock<HashMap<String, RegistryEntry>>>,
    ephemeral: Arc<Mutex<Option<EphemeralMongo>>>,
}

impl ConnectionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Store settings under their alias without opening a handle
    ///
    /// Re-registration is refused while the alias holds a live handle;
    /// disconnect first.
    pub async fn register(&self, settings: ConnectionSettings) -> Result<()> {
        let mut entries = self.entries.write().await;
        if let Some(existing) = entries.get(&settings.alias) {
            if existing.is_live() {
                return Err(Error::config(format!(
                    "alias '{}' has a live connection; disconnect before re-registering",
                    settings.alias
                )));
            }
        }
        tracing::debug!(alias = %settings.alias, "registering connection settings");
        entries.insert(settings.alias.clone(), RegistryEntry::new(settings));
        Ok(())
    }

    /// Registered aliases
    pub async fn aliases(&self) -> Vec<String> {
        self.entries.read().await.keys().cloned().collect()
    }

    /// Settings registered for an alias
    pub async fn settings(&self, alias: &str) -> Option<ConnectionSettings> {
        self.entries
            .read()
            .await
            .get(alias)
            .map(|entry| entry.settings.clone())
    }

    /// Whether an alias currently holds a live handle
    pub async fn is_live(&self, alias: &str) -> bool {
        self.entries
            .read()
            .await
            .get(alias)
            .is_some_and(RegistryEntry::is_live)
    }

    /// Return the live handle for an alias, opening it if necessary
    ///
    /// Idempotent for live aliases. Before opening, every other registered
    /// alias is scanned for equal shared settings; a live match donates its
    /// handle instead of a new connection being opened.
    pub async fn get_or_create(&self, alias: &str) -> Result<ConnectionHandle> {
        let mut entries = self.entries.write().await;

        let entry = entries
            .get(alias)
            .ok_or_else(|| Error::alias_not_defined(alias))?;
        if let Some(handle) = &entry.handle {
            return Ok(handle.clone());
        }
        let settings = entry.settings.clone();

        let key = settings.shared_key();
        let shared = entries.values().find_map(|other| {
            if other.settings.alias != alias && other.settings.shared_key() == key {
                other.handle.clone()
            } else {
                None
            }
        });

        let handle = match shared {
            Some(handle) => {
                tracing::debug!(alias, "sharing an existing connection handle");
                handle
            }
            None => {
                tracing::info!(alias, mode = ?settings.mode, "opening connection");
                self.open(&settings).await?
            }
        };

        if let Some(entry) = entries.get_mut(alias) {
            entry.handle = Some(handle.clone());
        }
        Ok(handle)
    }

    /// Open a handle for resolved settings, by their stored mode
    async fn open(&self, settings: &ConnectionSettings) -> Result<ConnectionHandle> {
        match settings.mode {
            ConnectionMode::Real => ConnectionHandle::open_real(settings).await,
            ConnectionMode::Mock => Self::open_mock(settings),
            ConnectionMode::Ephemeral => self.open_ephemeral(settings).await,
        }
    }

    #[cfg(feature = "mock")]
    fn open_mock(settings: &ConnectionSettings) -> Result<ConnectionHandle> {
        Ok(ConnectionHandle::Mock(crate::mock::MockClient::connect(
            settings.host.clone(),
            settings.port,
        )))
    }

    #[cfg(not(feature = "mock"))]
    fn open_mock(_settings: &ConnectionSettings) -> Result<ConnectionHandle> {
        Err(Error::MockUnavailable)
    }

    /// Acquire the registry's ephemeral instance, starting it on first use
    async fn open_ephemeral(&self, settings: &ConnectionSettings) -> Result<ConnectionHandle> {
        let mut slot = self.ephemeral.lock().await;
        if let Some(instance) = slot.as_ref() {
            if instance.is_ready() {
                return instance.handle();
            }
        }
        let instance = EphemeralMongo::start(settings.port, settings.preserve).await?;
        let handle = instance.handle()?;
        *slot = Some(instance);
        Ok(handle)
    }

    /// Close and remove an alias; returns whether it was registered
    ///
    /// Disconnecting the last ephemeral consumer tears the ephemeral
    /// instance down; teardown failures are logged, not surfaced.
    pub async fn disconnect(&self, alias: &str) -> Result<bool> {
        let mut entries = self.entries.write().await;
        let Some(removed) = entries.remove(alias) else {
            return Ok(false);
        };
        tracing::info!(alias, "disconnecting");

        if removed.settings.mode == ConnectionMode::Ephemeral {
            let still_used = entries
                .values()
                .any(|e| e.is_live() && e.settings.mode == ConnectionMode::Ephemeral);
            if !still_used {
                let mut slot = self.ephemeral.lock().await;
                if let Some(mut instance) = slot.take() {
                    if let Err(e) = instance.shutdown().await {
                        tracing::warn!(error = %e, "ephemeral teardown failed");
                    }
                }
            }
        }
        Ok(true)
    }

    /// Disconnect every registered alias
    pub async fn disconnect_all(&self) -> Result<()> {
        let aliases = self.aliases().await;
        for alias in aliases {
            self.disconnect(&alias).await?;
        }
        Ok(())
    }
}

impl Clone for ConnectionRegistry {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            ephemeral: Arc::clone(&self.ephemeral),
        }
    }
}
