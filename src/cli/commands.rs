//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// mongoduct CLI
#[derive(Parser, Debug)]
#[command(name = "mongoduct")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Application config file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the configuration and print the normalized settings
    ///
    /// Secrets are masked in the output.
    Resolve {
        /// Inline config JSON (overrides --config and the environment)
        #[arg(long)]
        config_json: Option<String>,
    },

    /// Acquire a connection and print its server info
    Check {
        /// Alias to check
        #[arg(short, long, default_value = "default")]
        alias: String,

        /// Inline config JSON (overrides --config and the environment)
        #[arg(long)]
        config_json: Option<String>,
    },

    /// Spawn a throwaway local instance and hold it until interrupted
    Ephemeral {
        /// Port to bind (the production default falls back to 27111)
        #[arg(short, long, default_value = "27111")]
        port: u16,

        /// Keep the data directory on teardown
        #[arg(long)]
        preserve: bool,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Human-readable output
    Pretty,
}
