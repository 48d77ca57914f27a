//! User account entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// A login account for a reception terminal or administrator.
///
/// The pair (`is_logged_in`, `last_login_time`) acts as a session lease:
/// the lease is held while `is_logged_in` is true and `last_login_time`
/// is within the configured timeout window, and expired otherwise. No
/// separate lease table or token exists; these two columns are mutated
/// only by the session gate.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique account identifier.
    pub id: Uuid,
    /// Unique login name (immutable).
    pub username: String,
    /// Argon2id password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Account role.
    pub role: UserRole,
    /// Application sections this account may open.
    pub sections_allowed: Vec<String>,
    /// Whether a session lease is currently claimed.
    pub is_logged_in: bool,
    /// When the current (or last) lease was acquired.
    pub last_login_time: Option<DateTime<Utc>>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Check if this account has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Check if this account may open the given application section.
    pub fn may_open(&self, section: &str) -> bool {
        self.role.is_admin() || self.sections_allowed.iter().any(|s| s == section)
    }
}

/// Data required to create a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Desired username.
    pub username: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Assigned role.
    pub role: UserRole,
    /// Initially allowed sections.
    pub sections_allowed: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(role: UserRole, sections: &[&str]) -> User {
        User {
            id: Uuid::new_v4(),
            username: "desk1".into(),
            password_hash: "x".into(),
            role,
            sections_allowed: sections.iter().map(|s| s.to_string()).collect(),
            is_logged_in: false,
            last_login_time: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_admin_may_open_everything() {
        let user = sample(UserRole::Admin, &[]);
        assert!(user.may_open("reports"));
    }

    #[test]
    fn test_user_restricted_to_allowed_sections() {
        let user = sample(UserRole::User, &["opd", "inventory"]);
        assert!(user.may_open("opd"));
        assert!(!user.may_open("reports"));
    }
}
