//! Medicine inventory models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A medicine known to the inventory.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Medicine {
    /// Unique medicine identifier.
    pub id: Uuid,
    /// Brand or catalog name (unique, case-insensitive).
    pub name: String,
    /// Generic (pharmacological) name.
    pub generic_name: Option<String>,
    /// Manufacturer.
    pub manufacturer: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// When the medicine was first recorded.
    pub created_at: DateTime<Utc>,
}

/// Data for recording a purchase batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPurchase {
    /// Medicine name; an unknown name creates the medicine on the fly.
    pub medicine_name: String,
    /// Supplier name.
    pub supplier: String,
    /// Purchased quantity (units).
    pub quantity: i32,
    /// Purchase date.
    pub purchase_date: NaiveDate,
    /// Batch expiry date.
    pub expiry_date: NaiveDate,
    /// Unit price, if recorded.
    pub unit_price: Option<f64>,
    /// Supplier batch number.
    pub batch_number: Option<String>,
}

/// Data for recording a supply (issue) against a purchase batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSupply {
    /// Medicine name; must already exist.
    pub medicine_name: String,
    /// The purchase batch the units are drawn from.
    pub purchase_id: Uuid,
    /// Supply date.
    pub supply_date: NaiveDate,
    /// Supplied quantity (units).
    pub quantity: i32,
    /// Receiving department.
    pub department: String,
    /// Person or ward the units were handed to.
    pub supplied_to: Option<String>,
}

/// Remaining stock of one purchase batch, ordered first-expiry-first-out.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BatchStock {
    /// The purchase batch identifier.
    pub batch_id: Uuid,
    /// Supplier name.
    pub supplier: String,
    /// Batch expiry date.
    pub expiry_date: NaiveDate,
    /// Units purchased in this batch.
    pub purchased_qty: i32,
    /// Units already supplied from this batch.
    pub supplied_qty: i64,
    /// Units still on the shelf.
    pub stock_left: i64,
}
