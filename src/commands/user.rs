//! Account management CLI commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use medidesk_auth::password::{PasswordHasher, PasswordPolicy};
use medidesk_core::error::AppError;
use medidesk_database::repositories::user::UserRepository;
use medidesk_entity::user::UserRole;
use medidesk_service::user::UserAdminService;

use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Create a new account
    Add {
        /// Username
        username: String,
        /// Role (admin or user)
        #[arg(short, long, default_value = "user")]
        role: UserRole,
        /// Allowed application sections (repeatable)
        #[arg(short, long)]
        section: Vec<String>,
        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// List all accounts
    List,
    /// Delete an account
    Delete {
        /// Username
        username: String,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
    /// Replace the allowed application sections for an account
    SetSections {
        /// Username
        username: String,
        /// Allowed application sections (repeatable)
        #[arg(short, long)]
        section: Vec<String>,
    },
}

/// Account display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// Username
    username: String,
    /// Role
    role: String,
    /// Allowed sections
    sections: String,
    /// Session state
    session: String,
    /// Created at
    created_at: String,
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
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
        UserCommand::Add {
            username,
            role,
            section,
            password,
        } => {
            let password = match password {
                Some(p) => p.clone(),
                None => dialoguer::Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {}", e)))?,
            };

            let user = admin
                .create_user(username, &password, *role, section.clone())
                .await?;

            output::print_success(&format!(
                "Account '{}' created (role: {})",
                user.username,
                user.role.as_str()
            ));
        }
        UserCommand::List => {
            let users = admin.list_users().await?;
            let rows: Vec<UserRow> = users
                .iter()
                .map(|u| UserRow {
                    username: u.username.clone(),
                    role: u.role.as_str().to_string(),
                    sections: u.sections_allowed.join(", "),
                    session: if u.is_logged_in { "active" } else { "free" }.to_string(),
                    created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
                })
                .collect();

            output::print_list(&rows, format);
        }
        UserCommand::Delete { username, force } => {
            if !force {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt(format!("Delete account '{}'?", username))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {}", e)))?;

                if !confirm {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            admin.delete_user(username).await?;
            output::print_success(&format!("Account '{}' deleted", username));
        }
        UserCommand::SetSections { username, section } => {
            admin.update_sections(username, section.clone()).await?;
            output::print_success(&format!(
                "Sections for '{}' set to [{}]",
                username,
                section.join(", ")
            ));
        }
    }

    Ok(())
}
