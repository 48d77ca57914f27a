//! Registration-number allocator.

use std::sync::Arc;

use tracing::{error, info};

use medidesk_core::error::{AppError, ErrorKind};
use medidesk_core::result::AppResult;
use medidesk_database::repositories::sequence::SequenceRepository;
use medidesk_entity::patient::{PatientCategory, RegistrationNumber};

/// Hands out unique registration numbers per patient category.
///
/// Each successful call returns a value never returned before for that
/// category, even when terminals allocate at the same instant; the
/// guarantee comes from the single atomic increment-and-return statement
/// in [`SequenceRepository`]. Failures are not retried here; the caller
/// aborts the enclosing registration and the operator decides whether to
/// try again.
#[derive(Debug, Clone)]
pub struct SequenceAllocator {
    sequences: Arc<SequenceRepository>,
}

impl SequenceAllocator {
    /// Creates a new allocator over the sequence repository.
    pub fn new(sequences: Arc<SequenceRepository>) -> Self {
        Self { sequences }
    }

    /// Allocates the next registration number for a category.
    pub async fn next(&self, category: PatientCategory) -> AppResult<RegistrationNumber> {
        let value = self.sequences.next_value(category).await.map_err(|e| {
            error!(category = %category, error = %e, "Registration number allocation failed");
            AppError::with_source(
                ErrorKind::Allocation,
                format!("Could not allocate a {category} registration number"),
                e,
            )
        })?;

        let number = RegistrationNumber::new(category, value);
        info!(number = %number, "Allocated registration number");
        Ok(number)
    }

    /// Returns the last number handed out for a category, if any.
    pub async fn last_allocated(
        &self,
        category: PatientCategory,
    ) -> AppResult<Option<RegistrationNumber>> {
        let value = self.sequences.current_value(category).await?;
        Ok(value.map(|v| RegistrationNumber::new(category, v)))
    }
}
