//! Read-side patient queries across the three category tables.

use std::sync::Arc;

use tracing::debug;

use medidesk_core::error::AppError;
use medidesk_core::result::AppResult;
use medidesk_core::types::pagination::{PageRequest, PageResponse};
use medidesk_database::repositories::patient::PatientRepository;
use medidesk_entity::patient::{OpdPatient, PatientSearchFilter, PatientSummary};

/// Searchable directory over all registered patients.
#[derive(Debug, Clone)]
pub struct PatientDirectory {
    patients: Arc<PatientRepository>,
}

impl PatientDirectory {
    /// Creates a new directory over the patient repository.
    pub fn new(patients: Arc<PatientRepository>) -> Self {
        Self { patients }
    }

    /// Lists patients across all categories, newest first.
    pub async fn list(&self, page: PageRequest) -> AppResult<PageResponse<PatientSummary>> {
        self.patients.list(&page).await
    }

    /// Searches patients by any combination of filter fields.
    ///
    /// Empty text fields and unset optional fields match everything, so
    /// an empty filter behaves like [`list`](Self::list). Text matching
    /// is case-insensitive substring; age matches within two years.
    pub async fn search(
        &self,
        filter: &PatientSearchFilter,
        page: PageRequest,
    ) -> AppResult<Vec<PatientSummary>> {
        let rows = self.patients.search(filter, &page).await?;
        debug!(matches = rows.len(), "Patient search completed");
        Ok(rows)
    }

    /// Fetches a single outpatient record by registration number.
    pub async fn find_opd(&self, registration_number: &str) -> AppResult<OpdPatient> {
        self.patients
            .find_opd_by_registration_number(registration_number)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "No OPD patient with registration number '{registration_number}'"
                ))
            })
    }
}
