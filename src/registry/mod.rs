//! Connection registry
//!
//! Process-wide state made explicit: the registry is an owned object mapping
//! aliases to resolved settings and live handles, deduplicating connections
//! whose settings are identical modulo the transient fields.

mod registry;
mod types;

pub use registry::ConnectionRegistry;
pub use types::RegistryEntry;

#[cfg(test)]
mod tests;
