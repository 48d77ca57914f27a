//! # medidesk-service
//!
//! Front-desk workflows composed from the repositories: patient
//! registration (number allocation + record insert), the patient
//! directory, medicine inventory, and user administration.

pub mod inventory;
pub mod patient;
pub mod registration;
pub mod user;
