//! Integration tests for medicine inventory.

mod common;

use std::sync::Arc;

use chrono::NaiveDate;

use medidesk_core::error::ErrorKind;
use medidesk_database::repositories::medicine::MedicineRepository;
use medidesk_entity::medicine::{NewPurchase, NewSupply};
use medidesk_service::inventory::InventoryService;

fn inventory(pool: &sqlx::PgPool) -> InventoryService {
    InventoryService::new(Arc::new(MedicineRepository::new(pool.clone())))
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn purchase(medicine: &str, quantity: i32, expiry: NaiveDate) -> NewPurchase {
    NewPurchase {
        medicine_name: medicine.to_string(),
        supplier: "HealWell Distributors".into(),
        quantity,
        purchase_date: date(2026, 1, 10),
        expiry_date: expiry,
        unit_price: Some(2.5),
        batch_number: None,
    }
}

#[tokio::test]
async fn test_purchase_creates_medicine_and_stock() {
    let Some(pool) = common::test_pool().await else {
        return;
    };
    let inventory = inventory(&pool);
    let medicine = common::unique_username("paracetamol");

    inventory
        .record_purchase(&purchase(&medicine, 200, date(2027, 6, 30)))
        .await
        .unwrap();
    assert_eq!(inventory.current_stock(&medicine).await.unwrap(), 200);

    // A second batch of the same medicine does not create a duplicate.
    inventory
        .record_purchase(&purchase(&medicine, 100, date(2027, 1, 31)))
        .await
        .unwrap();
    assert_eq!(inventory.current_stock(&medicine).await.unwrap(), 300);
}

#[tokio::test]
async fn test_supply_reduces_stock_and_respects_batch_limit() {
    let Some(pool) = common::test_pool().await else {
        return;
    };
    let inventory = inventory(&pool);
    let medicine = common::unique_username("amoxicillin");

    let batch_id = inventory
        .record_purchase(&purchase(&medicine, 50, date(2027, 6, 30)))
        .await
        .unwrap();

    inventory
        .record_supply(&NewSupply {
            medicine_name: medicine.clone(),
            purchase_id: batch_id,
            supply_date: date(2026, 2, 1),
            quantity: 20,
            department: "OPD Pharmacy".into(),
            supplied_to: None,
        })
        .await
        .unwrap();
    assert_eq!(inventory.current_stock(&medicine).await.unwrap(), 30);

    // More than the batch has left is refused.
    let err = inventory
        .record_supply(&NewSupply {
            medicine_name: medicine.clone(),
            purchase_id: batch_id,
            supply_date: date(2026, 2, 2),
            quantity: 31,
            department: "OPD Pharmacy".into(),
            supplied_to: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(inventory.current_stock(&medicine).await.unwrap(), 30);
}

#[tokio::test]
async fn test_supply_for_unknown_medicine_is_rejected() {
    let Some(pool) = common::test_pool().await else {
        return;
    };
    let inventory = inventory(&pool);

    let err = inventory
        .record_supply(&NewSupply {
            medicine_name: common::unique_username("nosuchmed"),
            purchase_id: uuid::Uuid::new_v4(),
            supply_date: date(2026, 2, 1),
            quantity: 1,
            department: "OPD Pharmacy".into(),
            supplied_to: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_batches_are_listed_soonest_expiry_first() {
    let Some(pool) = common::test_pool().await else {
        return;
    };
    let inventory = inventory(&pool);
    let medicine = common::unique_username("ibuprofen");

    inventory
        .record_purchase(&purchase(&medicine, 80, date(2027, 9, 30)))
        .await
        .unwrap();
    let early = inventory
        .record_purchase(&purchase(&medicine, 40, date(2026, 12, 31)))
        .await
        .unwrap();

    let batches = inventory.batchwise_stock(&medicine).await.unwrap();
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].batch_id, early, "earliest expiry must come first");
    assert!(batches[0].expiry_date < batches[1].expiry_date);

    // A fully supplied batch drops out of the view.
    inventory
        .record_supply(&NewSupply {
            medicine_name: medicine.clone(),
            purchase_id: early,
            supply_date: date(2026, 2, 1),
            quantity: 40,
            department: "Emergency".into(),
            supplied_to: None,
        })
        .await
        .unwrap();
    let batches = inventory.batchwise_stock(&medicine).await.unwrap();
    assert_eq!(batches.len(), 1);
    assert_ne!(batches[0].batch_id, early);
}

#[tokio::test]
async fn test_non_positive_quantities_are_rejected() {
    let Some(pool) = common::test_pool().await else {
        return;
    };
    let inventory = inventory(&pool);
    let medicine = common::unique_username("zeroqty");

    let err = inventory
        .record_purchase(&purchase(&medicine, 0, date(2027, 6, 30)))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}
