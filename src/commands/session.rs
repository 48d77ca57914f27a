//! Login session management commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use medidesk_auth::password::{PasswordHasher, PasswordPolicy};
use medidesk_core::error::AppError;
use medidesk_database::repositories::user::UserRepository;
use medidesk_service::user::UserAdminService;

use crate::output::{self, OutputFormat};

/// Arguments for session commands
#[derive(Debug, Args)]
pub struct SessionArgs {
    /// Session subcommand
    #[command(subcommand)]
    pub command: SessionCommand,
}

/// Session subcommands
#[derive(Debug, Subcommand)]
pub enum SessionCommand {
    /// Show the login slot of every account
    Status,
    /// Forcibly free a stuck login slot
    Unlock {
        /// Username
        username: String,
    },
}

/// Session display row for table output
#[derive(Debug, Serialize, Tabled)]
struct SessionRow {
    /// Username
    username: String,
    /// Slot state
    state: String,
    /// Last login time
    last_login: String,
}

/// Execute session commands
pub async fn execute(
    args: &SessionArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let pool = super::create_db_pool(&config).await?;
    let admin = UserAdminService::new(
        Arc::new(UserRepository::new(pool)),
        Arc::new(PasswordHasher::new()),
        PasswordPolicy::new(&config.auth),
        config.bootstrap.clone(),
    );

    match &args.command {
        SessionCommand::Status => {
            let users = admin.list_users().await?;
            let rows: Vec<SessionRow> = users
                .iter()
                .map(|u| SessionRow {
                    username: u.username.clone(),
                    state: if u.is_logged_in { "active" } else { "free" }.to_string(),
                    last_login: u
                        .last_login_time
                        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                        .unwrap_or_else(|| "never".to_string()),
                })
                .collect();

            output::print_list(&rows, format);
        }
        SessionCommand::Unlock { username } => {
            admin.force_unlock(username).await?;
            output::print_success(&format!("Login slot for '{}' released", username));
        }
    }

    Ok(())
}
