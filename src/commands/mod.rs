//! CLI command definitions and dispatch.

pub mod bootstrap;
pub mod migrate;
pub mod patient;
pub mod register;
pub mod session;
pub mod stock;
pub mod user;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use medidesk_core::error::AppError;

/// MediDesk - Hospital Front-Desk Patient Management
#[derive(Debug, Parser)]
#[command(name = "medidesk", version, about, long_about = None)]
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
    /// Seed the built-in administrator account
    Bootstrap(bootstrap::BootstrapArgs),
    /// Account management
    User(user::UserArgs),
    /// Login session management
    Session(session::SessionArgs),
    /// Patient registration
    Register(register::RegisterArgs),
    /// Patient directory queries
    Patient(patient::PatientArgs),
    /// Medicine inventory
    Stock(stock::StockArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &self.config).await,
            Commands::Bootstrap(args) => bootstrap::execute(args, &self.config).await,
            Commands::User(args) => user::execute(args, &self.config, self.format).await,
            Commands::Session(args) => session::execute(args, &self.config, self.format).await,
            Commands::Register(args) => register::execute(args, &self.config).await,
            Commands::Patient(args) => patient::execute(args, &self.config, self.format).await,
            Commands::Stock(args) => stock::execute(args, &self.config, self.format).await,
        }
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> Result<medidesk_core::config::AppConfig, AppError> {
    medidesk_core::config::AppConfig::load(config_path)
}

/// Helper: create database pool from config
pub async fn create_db_pool(
    config: &medidesk_core::config::AppConfig,
) -> Result<sqlx::PgPool, AppError> {
    let pool = medidesk_database::connection::DatabasePool::connect(&config.database).await?;
    Ok(pool.into_pool())
}
