//! Medicine inventory repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use medidesk_core::error::{AppError, ErrorKind};
use medidesk_core::result::AppResult;
use medidesk_entity::medicine::{BatchStock, Medicine, NewPurchase, NewSupply};

/// Repository for medicines, purchase batches, and supplies.
#[derive(Debug, Clone)]
pub struct MedicineRepository {
    pool: PgPool,
}

impl MedicineRepository {
    /// Create a new medicine repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a medicine by name (case-insensitive).
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Medicine>> {
        sqlx::query_as::<_, Medicine>("SELECT * FROM medicines WHERE LOWER(name) = LOWER($1)")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find medicine by name", e)
            })
    }

    /// Create a medicine entry.
    pub async fn create(
        &self,
        name: &str,
        generic_name: Option<&str>,
        manufacturer: Option<&str>,
        description: Option<&str>,
    ) -> AppResult<Medicine> {
        sqlx::query_as::<_, Medicine>(
            "INSERT INTO medicines (name, generic_name, manufacturer, description) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(name)
        .bind(generic_name)
        .bind(manufacturer)
        .bind(description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("medicines_name_lower_key") =>
            {
                AppError::conflict(format!("Medicine '{name}' already exists"))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create medicine", e),
        })
    }

    /// Record a purchase batch. Returns the batch id.
    pub async fn insert_purchase(&self, medicine_id: Uuid, data: &NewPurchase) -> AppResult<Uuid> {
        sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO medicine_purchases (medicine_id, purchase_date, quantity, supplier, \
             unit_price, expiry_date, batch_number) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING id",
        )
        .bind(medicine_id)
        .bind(data.purchase_date)
        .bind(data.quantity)
        .bind(&data.supplier)
        .bind(data.unit_price)
        .bind(data.expiry_date)
        .bind(&data.batch_number)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to record medicine purchase", e)
        })
    }

    /// Record a supply against a purchase batch.
    pub async fn insert_supply(&self, medicine_id: Uuid, data: &NewSupply) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO medicine_supplies (medicine_id, purchase_id, supply_date, quantity, \
             department, supplied_to) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(medicine_id)
        .bind(data.purchase_id)
        .bind(data.supply_date)
        .bind(data.quantity)
        .bind(&data.department)
        .bind(&data.supplied_to)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to record medicine supply", e)
        })?;
        Ok(())
    }

    /// Current stock of a medicine: total purchased minus total supplied.
    pub async fn current_stock(&self, medicine_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE((SELECT SUM(quantity) FROM medicine_purchases WHERE medicine_id = $1), 0) \
                  - COALESCE((SELECT SUM(quantity) FROM medicine_supplies WHERE medicine_id = $1), 0)",
        )
        .bind(medicine_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to compute current stock", e)
        })
    }

    /// Batch-wise remaining stock, soonest expiry first (FEFO order).
    /// Batches with nothing left are omitted.
    pub async fn batchwise_stock(&self, medicine_id: Uuid) -> AppResult<Vec<BatchStock>> {
        sqlx::query_as::<_, BatchStock>(
            "SELECT p.id AS batch_id, \
                    p.supplier, \
                    p.expiry_date, \
                    p.quantity AS purchased_qty, \
                    COALESCE(SUM(s.quantity), 0) AS supplied_qty, \
                    (p.quantity - COALESCE(SUM(s.quantity), 0)) AS stock_left \
             FROM medicine_purchases p \
             LEFT JOIN medicine_supplies s ON s.purchase_id = p.id \
             WHERE p.medicine_id = $1 \
             GROUP BY p.id, p.supplier, p.expiry_date, p.quantity \
             HAVING (p.quantity - COALESCE(SUM(s.quantity), 0)) > 0 \
             ORDER BY p.expiry_date ASC",
        )
        .bind(medicine_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to compute batchwise stock", e)
        })
    }
}
