//! # medidesk-database
//!
//! PostgreSQL connection pool, migration runner, and repositories.
//!
//! The repositories expose every SQL statement the application runs. Two
//! of them carry the concurrency-critical statements: the conditional
//! login-slot update in [`repositories::user::UserRepository`] and the
//! atomic increment-and-return in
//! [`repositories::sequence::SequenceRepository`].

pub mod connection;
pub mod migration;
pub mod repositories;
