//! Ephemeral test database instances
//!
//! Spawns a throwaway local `mongod` bound to a scratch directory, polls it
//! for readiness, and tears it down deterministically when the owning
//! registry drops it or disconnects the last consumer.

mod manager;

pub use manager::{EphemeralMongo, InstanceState, FALLBACK_PORT};

#[cfg(test)]
mod tests;
