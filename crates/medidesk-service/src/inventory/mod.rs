//! Medicine inventory: purchases, supplies and stock views.

pub mod service;

pub use service::InventoryService;
