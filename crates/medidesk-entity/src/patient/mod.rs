//! Patient entities: categories, registration numbers, and records.

pub mod category;
pub mod model;
pub mod registration;

pub use category::PatientCategory;
pub use model::{
    NewEpdPatient, NewIpdPatient, NewOpdPatient, OpdPatient, PatientDemographics,
    PatientSearchFilter, PatientSummary,
};
pub use registration::RegistrationNumber;
