//! Account administration: creation, removal, section grants and the
//! bootstrap administrator.

use std::sync::Arc;

use tracing::{info, warn};

use medidesk_auth::password::{PasswordHasher, PasswordPolicy};
use medidesk_core::config::bootstrap::BootstrapConfig;
use medidesk_core::error::AppError;
use medidesk_core::result::AppResult;
use medidesk_database::repositories::user::UserRepository;
use medidesk_entity::user::{CreateUser, User, UserRole};

/// Administrative operations over login accounts.
#[derive(Debug, Clone)]
pub struct UserAdminService {
    users: Arc<UserRepository>,
    hasher: Arc<PasswordHasher>,
    policy: PasswordPolicy,
    bootstrap: BootstrapConfig,
}

impl UserAdminService {
    /// Creates a new user administration service.
    pub fn new(
        users: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        policy: PasswordPolicy,
        bootstrap: BootstrapConfig,
    ) -> Self {
        Self {
            users,
            hasher,
            policy,
            bootstrap,
        }
    }

    /// Creates a new account with a policy-checked, hashed password.
    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        role: UserRole,
        sections_allowed: Vec<String>,
    ) -> AppResult<User> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::validation("Username must not be empty"));
        }
        self.policy.validate(password)?;

        let user = self
            .users
            .create(&CreateUser {
                username: username.to_owned(),
                password_hash: self.hasher.hash_password(password)?,
                role,
                sections_allowed,
            })
            .await?;

        info!(username = %user.username, role = %user.role.as_str(), "Created account");
        Ok(user)
    }

    /// Deletes an account. The bootstrap administrator cannot be removed.
    pub async fn delete_user(&self, username: &str) -> AppResult<()> {
        if username == self.bootstrap.admin_username {
            return Err(AppError::authorization(
                "The built-in administrator account cannot be deleted",
            ));
        }

        if !self.users.delete_by_username(username).await? {
            return Err(AppError::not_found(format!("User '{username}' not found")));
        }

        info!(%username, "Deleted account");
        Ok(())
    }

    /// Lists all accounts, oldest first.
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.users.find_all().await
    }

    /// Replaces the application sections an account may open.
    pub async fn update_sections(&self, username: &str, sections: Vec<String>) -> AppResult<()> {
        self.users.update_sections(username, &sections).await?;
        info!(%username, ?sections, "Updated allowed sections");
        Ok(())
    }

    /// Frees a stuck login slot without waiting for the lease to expire.
    pub async fn force_unlock(&self, username: &str) -> AppResult<()> {
        if self.users.find_by_username(username).await?.is_none() {
            return Err(AppError::not_found(format!("User '{username}' not found")));
        }

        self.users.release_login_slot(username).await?;
        warn!(%username, "Login slot forcibly released by administrator");
        Ok(())
    }

    /// Seeds the built-in administrator account if it does not exist.
    ///
    /// Idempotent; returns `true` when the account was created by this
    /// call. The default credentials come from configuration and should
    /// be changed after first login.
    pub async fn bootstrap_admin(&self) -> AppResult<bool> {
        if self
            .users
            .find_by_username(&self.bootstrap.admin_username)
            .await?
            .is_some()
        {
            return Ok(false);
        }

        self.users
            .create(&CreateUser {
                username: self.bootstrap.admin_username.clone(),
                password_hash: self.hasher.hash_password(&self.bootstrap.admin_password)?,
                role: UserRole::Admin,
                sections_allowed: Vec::new(),
            })
            .await?;

        info!(username = %self.bootstrap.admin_username, "Bootstrapped administrator account");
        Ok(true)
    }
}
