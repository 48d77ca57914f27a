//! Medicine inventory CLI commands.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use medidesk_core::error::AppError;
use medidesk_database::repositories::medicine::MedicineRepository;
use medidesk_entity::medicine::{NewPurchase, NewSupply};
use medidesk_service::inventory::InventoryService;

use crate::output::{self, OutputFormat};

/// Arguments for stock commands
#[derive(Debug, Args)]
pub struct StockArgs {
    /// Stock subcommand
    #[command(subcommand)]
    pub command: StockCommand,
}

/// Stock subcommands
#[derive(Debug, Subcommand)]
pub enum StockCommand {
    /// Record a purchase batch
    Purchase {
        /// Medicine name (created on first purchase)
        medicine: String,
        /// Supplier name
        #[arg(long)]
        supplier: String,
        /// Purchased quantity (units)
        #[arg(long)]
        quantity: i32,
        /// Batch expiry date
        #[arg(long)]
        expiry: NaiveDate,
        /// Purchase date (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Unit price
        #[arg(long)]
        unit_price: Option<f64>,
        /// Supplier batch number
        #[arg(long)]
        batch_number: Option<String>,
    },
    /// Record a supply drawn from a purchase batch
    Supply {
        /// Medicine name
        medicine: String,
        /// Purchase batch id
        #[arg(long)]
        batch: Uuid,
        /// Supplied quantity (units)
        #[arg(long)]
        quantity: i32,
        /// Receiving department
        #[arg(long)]
        department: String,
        /// Supply date (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Person or ward the units were handed to
        #[arg(long)]
        supplied_to: Option<String>,
    },
    /// Show current stock of a medicine
    Current {
        /// Medicine name
        medicine: String,
    },
    /// Show remaining stock per batch, soonest expiry first
    Batches {
        /// Medicine name
        medicine: String,
    },
}

/// Batch display row for table output
#[derive(Debug, Serialize, Tabled)]
struct BatchRow {
    /// Batch id
    batch: String,
    /// Supplier
    supplier: String,
    /// Expiry date
    expiry: String,
    /// Purchased units
    purchased: i32,
    /// Supplied units
    supplied: i64,
    /// Units left
    left: i64,
}

/// Execute stock commands
pub async fn execute(
    args: &StockArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let pool = super::create_db_pool(&config).await?;
    let inventory = InventoryService::new(Arc::new(MedicineRepository::new(pool)));
    let today = Local::now().date_naive();

    match &args.command {
        StockCommand::Purchase {
            medicine,
            supplier,
            quantity,
            expiry,
            date,
            unit_price,
            batch_number,
        } => {
            let batch_id = inventory
                .record_purchase(&NewPurchase {
                    medicine_name: medicine.clone(),
                    supplier: supplier.clone(),
                    quantity: *quantity,
                    purchase_date: date.unwrap_or(today),
                    expiry_date: *expiry,
                    unit_price: *unit_price,
                    batch_number: batch_number.clone(),
                })
                .await?;
            output::print_success(&format!(
                "Recorded purchase of {} x '{}' (batch {})",
                quantity, medicine, batch_id
            ));
        }
        StockCommand::Supply {
            medicine,
            batch,
            quantity,
            department,
            date,
            supplied_to,
        } => {
            inventory
                .record_supply(&NewSupply {
                    medicine_name: medicine.clone(),
                    purchase_id: *batch,
                    supply_date: date.unwrap_or(today),
                    quantity: *quantity,
                    department: department.clone(),
                    supplied_to: supplied_to.clone(),
                })
                .await?;
            output::print_success(&format!(
                "Recorded supply of {} x '{}' to {}",
                quantity, medicine, department
            ));
        }
        StockCommand::Current { medicine } => {
            let stock = inventory.current_stock(medicine).await?;
            output::print_kv(medicine, &format!("{} units", stock));
        }
        StockCommand::Batches { medicine } => {
            let batches = inventory.batchwise_stock(medicine).await?;
            let rows: Vec<BatchRow> = batches
                .iter()
                .map(|b| BatchRow {
                    batch: b.batch_id.to_string(),
                    supplier: b.supplier.clone(),
                    expiry: b.expiry_date.format("%Y-%m-%d").to_string(),
                    purchased: b.purchased_qty,
                    supplied: b.supplied_qty,
                    left: b.stock_left,
                })
                .collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
