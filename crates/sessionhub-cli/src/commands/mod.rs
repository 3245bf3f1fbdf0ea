//! CLI command definitions and dispatch.

pub mod config;
pub mod migrate;
pub mod session;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use sessionhub_core::config::{AppConfig, StoreProvider};
use sessionhub_core::error::AppError;
use sessionhub_database::DatabasePool;

/// SessionHub: HTTP client session tracking
#[derive(Debug, Parser)]
#[command(name = "sessionhub", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Inspect stored sessions
    Sessions(session::SessionArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &self.config).await,
            Commands::Sessions(args) => session::execute(args, &self.config, self.format).await,
            Commands::Config(args) => config::execute(args, &self.config, self.format),
        }
    }
}

/// Helper: load configuration from file plus environment overrides
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load_from(config_path)
}

/// Helper: connect to PostgreSQL, refusing other store providers
pub async fn connect_store(config: &AppConfig) -> Result<DatabasePool, AppError> {
    match config.store.provider()? {
        StoreProvider::Postgres => DatabasePool::connect(&config.database).await,
        StoreProvider::Memory => Err(AppError::configuration(
            "The in-memory store lives inside the server process; \
             set store.provider = \"postgres\" to use this command",
        )),
    }
}
