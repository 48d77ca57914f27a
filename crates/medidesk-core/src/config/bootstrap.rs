//! Built-in administrator bootstrap configuration.

use serde::{Deserialize, Serialize};

/// Settings for seeding the built-in administrator account.
///
/// The bootstrap is idempotent: the account is created only when no user
/// with the configured username exists. The built-in administrator can
/// never be deleted through user management.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Username of the built-in administrator.
    #[serde(default = "default_admin_username")]
    pub admin_username: String,
    /// Initial password of the built-in administrator.
    #[serde(default = "default_admin_password")]
    pub admin_password: String,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            admin_username: default_admin_username(),
            admin_password: default_admin_password(),
        }
    }
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_admin_password() -> String {
    "admin123".to_string()
}
