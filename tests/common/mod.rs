//! Shared helpers for integration tests.
//!
//! All integration tests need a real PostgreSQL instance. Set
//! `MEDIDESK_TEST_DATABASE_URL` to run them; when it is unset every test
//! skips instead of failing, so unit tests stay runnable without a
//! database.

#![allow(dead_code)]

use std::sync::Arc;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use medidesk_auth::password::PasswordHasher;
use medidesk_database::repositories::user::UserRepository;
use medidesk_entity::patient::PatientDemographics;
use medidesk_entity::user::{CreateUser, User, UserRole};

/// Connect to the test database, or `None` when no URL is configured.
pub async fn test_pool() -> Option<PgPool> {
    let url = match std::env::var("MEDIDESK_TEST_DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("MEDIDESK_TEST_DATABASE_URL not set; skipping");
            return None;
        }
    };

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&url)
        .await
        .expect("Failed to connect to test database");

    medidesk_database::migration::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    Some(pool)
}

/// A username that cannot collide across test binaries or runs.
pub fn unique_username(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

/// Create an account with a properly hashed password.
pub async fn create_user(pool: &PgPool, username: &str, password: &str, role: UserRole) -> User {
    let repo = UserRepository::new(pool.clone());
    let hasher = PasswordHasher::new();
    repo.create(&CreateUser {
        username: username.to_string(),
        password_hash: hasher.hash_password(password).expect("hashing failed"),
        role,
        sections_allowed: vec![],
    })
    .await
    .expect("Failed to create test user")
}

/// Shift an account's lease timestamp by `minutes` into the past.
pub async fn backdate_lease(pool: &PgPool, username: &str, minutes: i32) {
    sqlx::query("UPDATE users SET last_login_time = NOW() - make_interval(mins => $2) WHERE username = $1")
        .bind(username)
        .bind(minutes)
        .execute(pool)
        .await
        .expect("Failed to backdate lease");
}

/// Fetch the raw lease columns for an account.
pub async fn lease_state(pool: &PgPool, username: &str) -> (bool, Option<chrono::DateTime<chrono::Utc>>) {
    sqlx::query_as("SELECT is_logged_in, last_login_time FROM users WHERE username = $1")
        .bind(username)
        .fetch_one(pool)
        .await
        .expect("Failed to read lease state")
}

/// A user repository wrapped for service construction.
pub fn user_repo(pool: &PgPool) -> Arc<UserRepository> {
    Arc::new(UserRepository::new(pool.clone()))
}

/// Minimal demographics for registering test patients.
pub fn demographics(first_name: &str) -> PatientDemographics {
    PatientDemographics {
        first_name: first_name.to_string(),
        ..PatientDemographics::default()
    }
}
