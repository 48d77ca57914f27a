//! User administration.

pub mod admin;

pub use admin::UserAdminService;
