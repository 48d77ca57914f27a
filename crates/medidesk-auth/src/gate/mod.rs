//! The session gate: single-active-session enforcement per account.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use medidesk_core::config::session::SessionConfig;
use medidesk_core::result::AppResult;
use medidesk_database::repositories::user::UserRepository;

use crate::password::PasswordHasher;

/// Outcome of an authenticate call.
///
/// All three variants are expected business outcomes; infrastructure
/// failures (store unreachable, statement timeout) surface as `Err` and
/// must be treated as a denial by every caller, never as a grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginOutcome {
    /// Credentials valid and the login slot was acquired.
    Granted,
    /// Credentials valid but an unexpired session holds the slot
    /// elsewhere. Not a credential problem; retrying the password will
    /// not help. An admin force-unlock or the lease timeout will.
    AlreadyActive,
    /// Unknown username or wrong password. Deliberately does not say
    /// which, to avoid account enumeration.
    Denied,
}

/// Gates entry into the application per account.
///
/// Guarantees single-session semantics across concurrent terminals with
/// one atomic conditional UPDATE; no application-level lock is taken and
/// no login state is cached in-process. A lease that is never released
/// (client crash, network drop) expires after the configured timeout and
/// can then be reclaimed by the next login.
#[derive(Debug, Clone)]
pub struct SessionGate {
    /// Account persistence.
    users: Arc<UserRepository>,
    /// Password hash verification.
    hasher: Arc<PasswordHasher>,
    /// Lease timeout in minutes, fixed at construction.
    timeout_minutes: u64,
}

impl SessionGate {
    /// Creates a new session gate.
    pub fn new(
        users: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        config: &SessionConfig,
    ) -> Self {
        Self {
            users,
            hasher,
            timeout_minutes: config.timeout_minutes,
        }
    }

    /// Authenticates an account and claims its login slot.
    ///
    /// Step 1 verifies credentials with a plain read; a wrong password
    /// never touches the lease columns. Step 2 claims the slot with the
    /// conditional UPDATE in [`UserRepository::try_acquire_login_slot`],
    /// which is the sole serialization point: of any number of
    /// concurrent callers with correct credentials, exactly one sees an
    /// affected row.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<LoginOutcome> {
        if username.is_empty() {
            return Ok(LoginOutcome::Denied);
        }

        let Some(user) = self.users.find_by_username(username).await? else {
            info!(username, "Login rejected: unknown username");
            return Ok(LoginOutcome::Denied);
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            info!(username, "Login rejected: wrong password");
            return Ok(LoginOutcome::Denied);
        }

        if self
            .users
            .try_acquire_login_slot(username, self.timeout_minutes)
            .await?
        {
            info!(username, "Login granted");
            Ok(LoginOutcome::Granted)
        } else {
            warn!(
                username,
                timeout_minutes = self.timeout_minutes,
                "Login rejected: another session is active"
            );
            Ok(LoginOutcome::AlreadyActive)
        }
    }

    /// Releases the login slot for an account.
    ///
    /// Idempotent; called on normal logout, on application shutdown for
    /// the authenticated user, and by an administrator to forcibly
    /// reclaim a stuck session.
    pub async fn release(&self, username: &str) -> AppResult<()> {
        self.users.release_login_slot(username).await?;
        info!(username, "Login slot released");
        Ok(())
    }
}
