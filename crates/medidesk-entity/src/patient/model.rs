//! Patient record models.
//!
//! Only the OPD record has a full read model (it backs card reprints);
//! EPD and IPD records are written at registration time and surfaced
//! through [`PatientSummary`] rows afterwards.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Demographic fields shared by all three patient categories.
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
pub struct PatientDemographics {
    /// Given name (required).
    pub first_name: String,
    /// Family name.
    pub last_name: Option<String>,
    /// Father's name.
    pub father_name: Option<String>,
    /// National health account number.
    pub abha_number: Option<String>,
    /// Age in years.
    pub age: Option<i32>,
    /// Gender, as entered at the desk.
    pub gender: Option<String>,
    /// Mobile number.
    pub mobile_number: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// Post office.
    pub post_office: Option<String>,
    /// Town or village.
    pub town: Option<String>,
    /// State.
    pub state: Option<String>,
}

/// A stored outpatient record.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OpdPatient {
    /// Allocated registration number (displayed form).
    pub registration_number: String,
    /// Demographic fields.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub demographics: PatientDemographics,
    /// Registration fee charged.
    pub registration_fee: Option<f64>,
    /// Payment status (paid / due / waived).
    pub payment_status: Option<String>,
    /// Date of registration.
    pub registration_date: NaiveDate,
    /// Department the patient was referred to.
    pub medical_department: Option<String>,
    /// Username of the account that registered the patient.
    pub created_by: Option<String>,
}

/// Data for a new outpatient registration (number assigned by the
/// registration service).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOpdPatient {
    /// Demographic fields.
    pub demographics: PatientDemographics,
    /// Registration fee charged.
    pub registration_fee: Option<f64>,
    /// Payment status.
    pub payment_status: Option<String>,
    /// Date of registration.
    pub registration_date: NaiveDate,
    /// Department the patient was referred to.
    pub medical_department: Option<String>,
    /// Username of the registering account.
    pub created_by: Option<String>,
}

/// Data for a new emergency registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEpdPatient {
    /// Demographic fields.
    pub demographics: PatientDemographics,
    /// Department the patient was referred to.
    pub medical_department: Option<String>,
    /// Whether this is a police case.
    pub police_case: Option<bool>,
    /// Type of emergency.
    pub emergency_type: Option<String>,
    /// Mode of arrival (ambulance, walk-in, ...).
    pub arrival_mode: Option<String>,
    /// When the patient arrived.
    pub arrival_datetime: Option<DateTime<Utc>>,
    /// Triage level assigned at intake.
    pub triage_level: Option<String>,
    /// Attending doctor.
    pub attending_doctor: Option<String>,
    /// Outcome (admitted, discharged, referred, ...).
    pub outcome: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Date of registration.
    pub date: NaiveDate,
    /// Username of the registering account.
    pub created_by: Option<String>,
}

/// Data for a new inpatient admission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewIpdPatient {
    /// Demographic fields.
    pub demographics: PatientDemographics,
    /// Admitting department.
    pub medical_department: Option<String>,
    /// Whether this is a police case.
    pub police_case: Option<bool>,
    /// Assigned bed number.
    pub bed_number: Option<String>,
    /// Assigned room number.
    pub room_number: Option<String>,
    /// Date of admission.
    pub admission_date: NaiveDate,
    /// Date of discharge, if already known.
    pub discharge_date: Option<NaiveDate>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Username of the registering account.
    pub created_by: Option<String>,
}

/// Search filters for the cross-category patient directory.
///
/// Empty strings and `None` values mean "no constraint". An age filter
/// matches a band of two years either side, matching how the desk staff
/// search when the exact age on the card is uncertain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientSearchFilter {
    /// Exact registration number.
    pub registration_number: String,
    /// Substring of first or last name (case-insensitive).
    pub name: String,
    /// Substring of father's name (case-insensitive).
    pub father_name: String,
    /// Exact mobile number.
    pub phone: String,
    /// Exact department.
    pub department: String,
    /// Substring of town (case-insensitive).
    pub town: String,
    /// Substring of state (case-insensitive).
    pub state: String,
    /// Exact gender.
    pub gender: String,
    /// Approximate age (matches age ± 2 years).
    pub age: Option<i32>,
    /// Earliest registration date.
    pub from_date: Option<NaiveDate>,
    /// Latest registration date.
    pub to_date: Option<NaiveDate>,
    /// Restrict to one category; `None` searches all three.
    pub category: Option<super::category::PatientCategory>,
}

/// A unified row returned by cross-category listing and search.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PatientSummary {
    /// Registration number (displayed form).
    pub registration_number: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: Option<String>,
    /// Mobile number.
    pub mobile_number: Option<String>,
    /// Gender.
    pub gender: Option<String>,
    /// Age in years.
    pub age: Option<i32>,
    /// Category tag: `OPD`, `EPD`, or `IPD`.
    pub patient_type: String,
    /// Registration / intake / admission date, depending on category.
    pub registration_date: Option<NaiveDate>,
    /// Department.
    pub medical_department: Option<String>,
    /// Town or village.
    pub town: Option<String>,
    /// State.
    pub state: Option<String>,
}
