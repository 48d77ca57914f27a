//! Patient directory: listing, search and lookup.

pub mod directory;

pub use directory::PatientDirectory;
