//! Registration workflows for the three patient categories.

use std::sync::Arc;

use tracing::{info, warn};

use medidesk_core::result::AppResult;
use medidesk_database::repositories::patient::PatientRepository;
use medidesk_entity::patient::{
    NewEpdPatient, NewIpdPatient, NewOpdPatient, PatientCategory, RegistrationNumber,
};

use super::allocator::SequenceAllocator;

/// Registers patients: allocate a number, then insert the record.
///
/// One allocation per attempt. If the insert fails after a successful
/// allocation, the number stays consumed: the counter is never rolled
/// back, so a retried registration gets a fresh number and the failed
/// one remains a gap.
#[derive(Debug, Clone)]
pub struct RegistrationService {
    allocator: SequenceAllocator,
    patients: Arc<PatientRepository>,
}

impl RegistrationService {
    /// Creates a new registration service.
    pub fn new(allocator: SequenceAllocator, patients: Arc<PatientRepository>) -> Self {
        Self {
            allocator,
            patients,
        }
    }

    /// Registers an outpatient and returns the allocated number.
    pub async fn register_opd(&self, data: &NewOpdPatient) -> AppResult<RegistrationNumber> {
        let number = self.allocator.next(PatientCategory::Opd).await?;

        if let Err(e) = self
            .patients
            .insert_opd(&number.to_string(), data)
            .await
        {
            warn!(number = %number, error = %e, "OPD insert failed; number is burned");
            return Err(e);
        }

        info!(number = %number, "Registered OPD patient");
        Ok(number)
    }

    /// Registers an emergency patient and returns the allocated number.
    pub async fn register_epd(&self, data: &NewEpdPatient) -> AppResult<RegistrationNumber> {
        let number = self.allocator.next(PatientCategory::Epd).await?;

        if let Err(e) = self
            .patients
            .insert_epd(&number.to_string(), data)
            .await
        {
            warn!(number = %number, error = %e, "EPD insert failed; number is burned");
            return Err(e);
        }

        info!(number = %number, "Registered EPD patient");
        Ok(number)
    }

    /// Admits an inpatient and returns the allocated number.
    pub async fn register_ipd(&self, data: &NewIpdPatient) -> AppResult<RegistrationNumber> {
        let number = self.allocator.next(PatientCategory::Ipd).await?;

        if let Err(e) = self
            .patients
            .insert_ipd(&number.to_string(), data)
            .await
        {
            warn!(number = %number, error = %e, "IPD insert failed; number is burned");
            return Err(e);
        }

        info!(number = %number, "Registered IPD patient");
        Ok(number)
    }
}
