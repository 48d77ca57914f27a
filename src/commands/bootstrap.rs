//! Built-in administrator bootstrap command.

use std::sync::Arc;

use clap::Args;

use medidesk_auth::password::{PasswordHasher, PasswordPolicy};
use medidesk_core::error::AppError;
use medidesk_database::repositories::user::UserRepository;
use medidesk_service::user::UserAdminService;

use crate::output;

/// Arguments for the bootstrap command
#[derive(Debug, Args)]
pub struct BootstrapArgs {}

/// Execute the bootstrap command
pub async fn execute(_args: &BootstrapArgs, config_path: &str) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let pool = super::create_db_pool(&config).await?;

    let admin = UserAdminService::new(
        Arc::new(UserRepository::new(pool)),
        Arc::new(PasswordHasher::new()),
        PasswordPolicy::new(&config.auth),
        config.bootstrap.clone(),
    );

    if admin.bootstrap_admin().await? {
        output::print_success(&format!(
            "Administrator '{}' created with the default password.",
            config.bootstrap.admin_username
        ));
        output::print_warning("Change the default password after first login.");
    } else {
        println!(
            "Administrator '{}' already exists; nothing to do.",
            config.bootstrap.admin_username
        );
    }

    Ok(())
}
