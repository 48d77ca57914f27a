//! Integration tests for registration-number allocation.

mod common;

use std::collections::HashSet;
use std::sync::Arc;

use medidesk_database::repositories::sequence::SequenceRepository;
use medidesk_entity::patient::PatientCategory;
use medidesk_service::registration::SequenceAllocator;

#[tokio::test]
async fn test_concurrent_allocations_are_unique_and_gap_free() {
    let Some(pool) = common::test_pool().await else {
        return;
    };
    let allocator = SequenceAllocator::new(Arc::new(SequenceRepository::new(pool.clone())));
    let category = PatientCategory::Ipd;

    let baseline = allocator
        .last_allocated(category)
        .await
        .unwrap()
        .map(|n| n.value)
        .unwrap_or(0);

    let attempts = (0..100).map(|_| {
        let allocator = allocator.clone();
        tokio::spawn(async move { allocator.next(category).await.unwrap() })
    });
    let numbers: Vec<i64> = futures::future::join_all(attempts)
        .await
        .into_iter()
        .map(|r| r.unwrap().value)
        .collect();

    let distinct: HashSet<i64> = numbers.iter().copied().collect();
    assert_eq!(distinct.len(), 100, "every allocation must be unique");

    let max = *numbers.iter().max().unwrap();
    let min = *numbers.iter().min().unwrap();
    assert!(min > baseline);
    assert_eq!(
        max - baseline,
        100,
        "allocations from a single allocator must be dense"
    );
}

#[tokio::test]
async fn test_categories_count_independently() {
    let Some(pool) = common::test_pool().await else {
        return;
    };
    let allocator = SequenceAllocator::new(Arc::new(SequenceRepository::new(pool.clone())));

    let opd_before = allocator
        .last_allocated(PatientCategory::Opd)
        .await
        .unwrap()
        .map(|n| n.value)
        .unwrap_or(0);
    let epd_before = allocator
        .last_allocated(PatientCategory::Epd)
        .await
        .unwrap()
        .map(|n| n.value)
        .unwrap_or(0);

    let opd = allocator.next(PatientCategory::Opd).await.unwrap();
    assert_eq!(opd.value, opd_before + 1);
    assert_eq!(opd.category, PatientCategory::Opd);

    let epd = allocator
        .last_allocated(PatientCategory::Epd)
        .await
        .unwrap()
        .map(|n| n.value)
        .unwrap_or(0);
    assert_eq!(
        epd, epd_before,
        "allocating one category must not advance another"
    );
}

#[tokio::test]
async fn test_display_form_is_prefixed_and_zero_padded() {
    let Some(pool) = common::test_pool().await else {
        return;
    };
    let allocator = SequenceAllocator::new(Arc::new(SequenceRepository::new(pool.clone())));

    let number = allocator.next(PatientCategory::Epd).await.unwrap();
    assert_eq!(number.to_string(), format!("EPD-{:06}", number.value));
}
