//! User repository implementation.
//!
//! Besides plain account CRUD, this repository owns the two statements
//! that back the session gate: the conditional login-slot acquisition and
//! the unconditional release. The conditional UPDATE is the sole
//! serialization point for single-session enforcement; the row-level
//! write atomicity of PostgreSQL is the mutual-exclusion primitive.

use sqlx::PgPool;

use medidesk_core::error::{AppError, ErrorKind};
use medidesk_core::result::AppResult;
use medidesk_entity::user::{CreateUser, User};

/// Repository for account CRUD and login-slot operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an account by username.
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by username", e)
            })
    }

    /// List all accounts, oldest first.
    pub async fn find_all(&self) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))
    }

    /// Create a new account.
    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (username, password_hash, role, sections_allowed) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(&data.username)
        .bind(&data.password_hash)
        .bind(data.role)
        .bind(&data.sections_allowed)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("users_username_key") =>
            {
                AppError::conflict(format!("Username '{}' already exists", data.username))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create user", e),
        })
    }

    /// Delete an account by username. Returns whether a row was removed.
    pub async fn delete_by_username(&self, username: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE username = $1")
            .bind(username)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete user", e))?;

        Ok(result.rows_affected() > 0)
    }

    /// Replace the allowed application sections for an account.
    pub async fn update_sections(&self, username: &str, sections: &[String]) -> AppResult<()> {
        let result = sqlx::query("UPDATE users SET sections_allowed = $2 WHERE username = $1")
            .bind(username)
            .bind(sections)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update sections", e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("User '{username}' not found")));
        }
        Ok(())
    }

    /// Atomically claim the login slot for an account.
    ///
    /// The slot is claimable when no lease is held or when the held lease
    /// is older than `timeout_minutes`. The expiry check lives inside the
    /// UPDATE predicate so there is no read-then-write window between
    /// observing an expired lease and claiming it. Returns `true` when
    /// this caller acquired the slot (exactly one of any set of
    /// concurrent callers does), `false` when an unexpired lease is held
    /// elsewhere.
    pub async fn try_acquire_login_slot(
        &self,
        username: &str,
        timeout_minutes: u64,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE users \
             SET is_logged_in = TRUE, last_login_time = NOW() \
             WHERE username = $1 \
               AND (is_logged_in = FALSE \
                    OR last_login_time IS NULL \
                    OR last_login_time <= NOW() - make_interval(mins => $2))",
        )
        .bind(username)
        .bind(timeout_minutes as i32)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to acquire login slot", e)
        })?;

        Ok(result.rows_affected() == 1)
    }

    /// Release the login slot for an account.
    ///
    /// Unconditional and idempotent: releasing an already-free slot is a
    /// no-op success. Also used by administrators to reclaim a stuck
    /// session without waiting for the lease to expire.
    pub async fn release_login_slot(&self, username: &str) -> AppResult<()> {
        sqlx::query("UPDATE users SET is_logged_in = FALSE WHERE username = $1")
            .bind(username)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to release login slot", e)
            })?;
        Ok(())
    }
}
