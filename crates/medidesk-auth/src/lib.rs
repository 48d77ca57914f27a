//! # medidesk-auth
//!
//! Credential handling and the session gate.
//!
//! The gate enforces that each account has at most one active session
//! across all reception terminals, using a single conditional UPDATE
//! against the shared users table as the mutual-exclusion primitive.
//! There is no in-process record of who is logged in; the table row is
//! the only lease, so every terminal observes the same state.

pub mod gate;
pub mod password;

pub use gate::{LoginOutcome, SessionGate};
pub use password::{PasswordHasher, PasswordPolicy};
