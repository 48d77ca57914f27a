//! # medidesk-entity
//!
//! Domain entity models for MediDesk: accounts, patients, registration
//! numbers, and medicine inventory records.

pub mod medicine;
pub mod patient;
pub mod user;
