//! Command-line interface
//!
//! Small operational surface over the library: resolve configuration,
//! check a connection, or hold an ephemeral instance for manual testing.

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
