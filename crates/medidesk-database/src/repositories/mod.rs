//! Repository implementations, one per aggregate.

pub mod medicine;
pub mod patient;
pub mod sequence;
pub mod user;
