//! Inventory workflows over the medicine repository.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use medidesk_core::error::AppError;
use medidesk_core::result::AppResult;
use medidesk_database::repositories::medicine::MedicineRepository;
use medidesk_entity::medicine::{BatchStock, Medicine, NewPurchase, NewSupply};

/// Medicine stock management.
///
/// Stock is never stored directly; it is always derived as total
/// purchased minus total supplied, so purchases and supplies are the
/// only writes and the figures cannot drift.
#[derive(Debug, Clone)]
pub struct InventoryService {
    medicines: Arc<MedicineRepository>,
}

impl InventoryService {
    /// Creates a new inventory service.
    pub fn new(medicines: Arc<MedicineRepository>) -> Self {
        Self { medicines }
    }

    /// Records a purchase batch. An unknown medicine name creates the
    /// medicine on the fly. Returns the new batch id.
    pub async fn record_purchase(&self, data: &NewPurchase) -> AppResult<Uuid> {
        if data.quantity <= 0 {
            return Err(AppError::validation("Purchase quantity must be positive"));
        }

        let medicine = match self.medicines.find_by_name(&data.medicine_name).await? {
            Some(m) => m,
            None => {
                let m = self
                    .medicines
                    .create(&data.medicine_name, None, None, None)
                    .await?;
                info!(medicine = %m.name, "Created medicine from first purchase");
                m
            }
        };

        let batch_id = self.medicines.insert_purchase(medicine.id, data).await?;
        info!(medicine = %medicine.name, %batch_id, quantity = data.quantity, "Recorded purchase");
        Ok(batch_id)
    }

    /// Records a supply drawn from a purchase batch.
    ///
    /// The medicine must already exist and the batch must have enough
    /// units left.
    pub async fn record_supply(&self, data: &NewSupply) -> AppResult<()> {
        if data.quantity <= 0 {
            return Err(AppError::validation("Supply quantity must be positive"));
        }

        let medicine = self.require_medicine(&data.medicine_name).await?;

        let batches = self.medicines.batchwise_stock(medicine.id).await?;
        let batch = batches
            .iter()
            .find(|b| b.batch_id == data.purchase_id)
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "No batch {} with remaining stock for '{}'",
                    data.purchase_id, medicine.name
                ))
            })?;
        if i64::from(data.quantity) > batch.stock_left {
            return Err(AppError::validation(format!(
                "Batch {} has only {} units left",
                batch.batch_id, batch.stock_left
            )));
        }

        self.medicines.insert_supply(medicine.id, data).await?;
        info!(medicine = %medicine.name, quantity = data.quantity, "Recorded supply");
        Ok(())
    }

    /// Total units currently on the shelf for a medicine.
    pub async fn current_stock(&self, medicine_name: &str) -> AppResult<i64> {
        let medicine = self.require_medicine(medicine_name).await?;
        self.medicines.current_stock(medicine.id).await
    }

    /// Remaining stock per batch, soonest expiry first. Empty batches
    /// are omitted, so the first row is the one to draw from.
    pub async fn batchwise_stock(&self, medicine_name: &str) -> AppResult<Vec<BatchStock>> {
        let medicine = self.require_medicine(medicine_name).await?;
        self.medicines.batchwise_stock(medicine.id).await
    }

    async fn require_medicine(&self, name: &str) -> AppResult<Medicine> {
        self.medicines
            .find_by_name(name)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Unknown medicine '{name}'")))
    }
}
