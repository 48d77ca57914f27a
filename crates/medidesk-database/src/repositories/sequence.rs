//! Registration sequence repository.
//!
//! Hands out per-category counter values through a single atomic
//! increment-and-return statement, the PostgreSQL equivalent of the
//! stored procedure the reception terminals used to call. A
//! read-current-then-write-incremented implementation from the
//! application tier would admit a lost-update race and must never be
//! introduced here.

use sqlx::PgPool;

use medidesk_core::error::{AppError, ErrorKind};
use medidesk_core::result::AppResult;
use medidesk_entity::patient::PatientCategory;

/// Repository for the per-category registration counters.
#[derive(Debug, Clone)]
pub struct SequenceRepository {
    pool: PgPool,
}

impl SequenceRepository {
    /// Create a new sequence repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Atomically increment and return the counter for a category.
    ///
    /// The first call for a category initializes it at 1. Concurrent
    /// callers are linearized by the row-level atomicity of the upsert;
    /// no two calls ever observe the same value.
    pub async fn next_value(&self, category: PatientCategory) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO registration_sequences (category, current_value) \
             VALUES ($1, 1) \
             ON CONFLICT (category) DO UPDATE \
             SET current_value = registration_sequences.current_value + 1 \
             RETURNING current_value",
        )
        .bind(category.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to advance {category} registration sequence"),
                e,
            )
        })
    }

    /// Return the last value handed out for a category, if any call was
    /// ever made. Read-only; never initializes the counter.
    pub async fn current_value(&self, category: PatientCategory) -> AppResult<Option<i64>> {
        sqlx::query_scalar::<_, i64>(
            "SELECT current_value FROM registration_sequences WHERE category = $1",
        )
        .bind(category.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to read registration sequence", e)
        })
    }
}
