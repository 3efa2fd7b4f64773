// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # mongoduct
//!
//! A minimal, Rust-native connection lifecycle toolkit for MongoDB
//! applications: configuration resolution, an alias registry with
//! connection sharing, throwaway test instances, and form binding.
//!
//! ## Features
//!
//! - **Settings Resolution**: flat keys, a nested settings mapping, or a
//!   list of mappings all normalize into one canonical record per alias
//! - **Connection Sharing**: aliases that point at the same target reuse
//!   one live driver client
//! - **Test Modes**: `mongomock://` hosts get an in-memory mock client;
//!   the temp-db flag provisions a throwaway local `mongod`
//! - **Form Binding**: validated form data onto models, filtered to the
//!   declared field set
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mongoduct::{AppConfig, Mongo, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Load application config (YAML, JSON, or environment)
//!     let config = AppConfig::from_yaml_file("app.yaml")?;
//!
//!     // Resolve and register every configured alias
//!     let mongo = Mongo::new(&config).await?;
//!
//!     // Acquire a connection (opened lazily, shared across equal targets)
//!     let handle = mongo.default_connection().await?;
//!     let info = handle.server_info().await?;
//!
//!     // Deterministic teardown
//!     mongo.disconnect_all().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       Mongo (app context)                       │
//! │   AppConfig → SettingsResolver → ConnectionRegistry → Handle    │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴──────────┬──────────────────────┐
//! │   Settings   │         Registry         │       Handles        │
//! ├──────────────┼──────────────────────────┼──────────────────────┤
//! │ flat/nested  │ alias → settings, handle │ Real (driver client) │
//! │ URI dissect  │ sharing across aliases   │ Mock (in-memory)     │
//! │ mode resolve │ ephemeral ownership      │ Ephemeral (mongod)   │
//! └──────────────┴──────────────────────────┴──────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the toolkit
pub mod error;

/// Common types and type aliases
pub mod types;

/// Application configuration
pub mod config;

/// Connection settings resolution
pub mod settings;

/// Connection handles
pub mod handle;

/// In-memory mock client
#[cfg(feature = "mock")]
pub mod mock;

/// Connection registry
pub mod registry;

/// Ephemeral test database instances
pub mod ephemeral;

/// Form binding
pub mod forms;

/// Application context
pub mod app;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use app::Mongo;
pub use config::AppConfig;
pub use ephemeral::EphemeralMongo;
pub use forms::{FormModel, ModelForm};
pub use handle::ConnectionHandle;
#[cfg(feature = "mock")]
pub use mock::MockClient;
pub use registry::ConnectionRegistry;
pub use settings::{ConnectionSettings, SettingsResolver};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
