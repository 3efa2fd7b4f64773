//! CLI runner - executes commands

use crate::app::Mongo;
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::AppConfig;
use crate::ephemeral::EphemeralMongo;
use crate::error::Result;
use crate::settings::SettingsResolver;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Resolve { config_json } => self.resolve(config_json.as_deref()),
            Commands::Check { alias, config_json } => {
                self.check(alias, config_json.as_deref()).await
            }
            Commands::Ephemeral { port, preserve } => self.ephemeral(*port, *preserve).await,
        }
    }

    /// Load the application config: inline JSON, config file, or environment
    fn load_config(&self, inline: Option<&str>) -> Result<AppConfig> {
        if let Some(json) = inline {
            return AppConfig::from_value(serde_json::from_str(json)?);
        }
        if let Some(path) = &self.cli.config {
            return AppConfig::from_yaml_file(path);
        }
        AppConfig::from_env()
    }

    /// Print the normalized settings for every configured alias
    fn resolve(&self, config_json: Option<&str>) -> Result<()> {
        let config = self.load_config(config_json)?;
        let resolver = SettingsResolver::from_config(&config);
        let settings = resolver.resolve(&config.connection_config())?;

        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(&settings)?);
            }
            OutputFormat::Pretty => {
                for s in &settings {
                    println!(
                        "{}: {}:{}/{} (mode: {:?})",
                        s.alias, s.host, s.port, s.database, s.mode
                    );
                }
            }
        }
        Ok(())
    }

    /// Acquire a connection and print the server info it reports
    async fn check(&self, alias: &str, config_json: Option<&str>) -> Result<()> {
        let config = self.load_config(config_json)?;
        let mongo = Mongo::new(&config).await?;

        let handle = mongo.connection(alias).await?;
        let info = handle.server_info().await?;

        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(&info)?);
            }
            OutputFormat::Pretty => {
                let version = info.get_str("version").unwrap_or("unknown");
                println!("alias '{alias}': server version {version}");
            }
        }

        mongo.disconnect_all().await
    }

    /// Spawn a throwaway instance, report it, and hold until Ctrl-C
    async fn ephemeral(&self, port: u16, preserve: bool) -> Result<()> {
        let mut instance = EphemeralMongo::start(port, preserve).await?;
        println!(
            "ephemeral mongod on port {} (dbpath: {}, started {})",
            instance.port(),
            instance
                .dbpath()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            instance.started_at().format("%H:%M:%S"),
        );
        println!("press Ctrl-C to stop");

        tokio::signal::ctrl_c().await?;
        instance.shutdown().await
    }
}
