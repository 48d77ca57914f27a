//! Medicine inventory entities.

pub mod model;

pub use model::{BatchStock, Medicine, NewPurchase, NewSupply};
