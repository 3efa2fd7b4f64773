//! Registry entry types

use crate::handle::ConnectionHandle;
use crate::settings::ConnectionSettings;

/// One registered alias: its settings and, once opened, its live handle
#[derive(Debug, Clone)]
pub struct RegistryEntry {
    /// Resolved settings for this alias
    pub settings: ConnectionSettings,

    /// Live handle, present only after a successful acquisition
    pub handle: Option<ConnectionHandle>,
}

impl RegistryEntry {
    /// Entry for freshly registered settings, with no handle yet
    pub fn new(settings: ConnectionSettings) -> Self {
        Self {
            settings,
            handle: None,
        }
    }

    /// Whether this alias currently holds a live handle
    pub fn is_live(&self) -> bool {
        self.handle.is_some()
    }
}
