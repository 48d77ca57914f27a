//! Patient repository implementation.
//!
//! Inserts take a pre-allocated registration number; allocation is the
//! registration service's job and is never retried from here. Listing
//! and search run over a UNION of the three category tables.

use sqlx::PgPool;

use medidesk_core::error::{AppError, ErrorKind};
use medidesk_core::result::AppResult;
use medidesk_core::types::pagination::{PageRequest, PageResponse};
use medidesk_entity::patient::{
    NewEpdPatient, NewIpdPatient, NewOpdPatient, OpdPatient, PatientCategory, PatientSearchFilter,
    PatientSummary,
};

/// Columns every summary row carries, in UNION order.
const SUMMARY_COLUMNS: &str = "registration_number, first_name, last_name, mobile_number, \
                               gender, age";

/// Repository for patient records across all three categories.
#[derive(Debug, Clone)]
pub struct PatientRepository {
    pool: PgPool,
}

impl PatientRepository {
    /// Create a new patient repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert an outpatient record under an already-allocated number.
    pub async fn insert_opd(&self, registration_number: &str, data: &NewOpdPatient) -> AppResult<()> {
        let d = &data.demographics;
        sqlx::query(
            "INSERT INTO opd_patients (registration_number, first_name, last_name, father_name, \
             abha_number, age, gender, mobile_number, email, address, post_office, town, state, \
             registration_fee, payment_status, registration_date, medical_department, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)",
        )
        .bind(registration_number)
        .bind(&d.first_name)
        .bind(&d.last_name)
        .bind(&d.father_name)
        .bind(&d.abha_number)
        .bind(d.age)
        .bind(&d.gender)
        .bind(&d.mobile_number)
        .bind(&d.email)
        .bind(&d.address)
        .bind(&d.post_office)
        .bind(&d.town)
        .bind(&d.state)
        .bind(data.registration_fee)
        .bind(&data.payment_status)
        .bind(data.registration_date)
        .bind(&data.medical_department)
        .bind(&data.created_by)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to insert OPD patient", e)
        })?;
        Ok(())
    }

    /// Insert an emergency record under an already-allocated number.
    pub async fn insert_epd(&self, registration_number: &str, data: &NewEpdPatient) -> AppResult<()> {
        let d = &data.demographics;
        sqlx::query(
            "INSERT INTO epd_patients (registration_number, first_name, last_name, father_name, \
             abha_number, age, gender, mobile_number, email, address, post_office, town, state, \
             medical_department, police_case, emergency_type, arrival_mode, arrival_datetime, \
             triage_level, attending_doctor, outcome, notes, date, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, \
             $18, $19, $20, $21, $22, $23, $24)",
        )
        .bind(registration_number)
        .bind(&d.first_name)
        .bind(&d.last_name)
        .bind(&d.father_name)
        .bind(&d.abha_number)
        .bind(d.age)
        .bind(&d.gender)
        .bind(&d.mobile_number)
        .bind(&d.email)
        .bind(&d.address)
        .bind(&d.post_office)
        .bind(&d.town)
        .bind(&d.state)
        .bind(&data.medical_department)
        .bind(data.police_case)
        .bind(&data.emergency_type)
        .bind(&data.arrival_mode)
        .bind(data.arrival_datetime)
        .bind(&data.triage_level)
        .bind(&data.attending_doctor)
        .bind(&data.outcome)
        .bind(&data.notes)
        .bind(data.date)
        .bind(&data.created_by)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to insert EPD patient", e)
        })?;
        Ok(())
    }

    /// Insert an inpatient record under an already-allocated number.
    pub async fn insert_ipd(&self, registration_number: &str, data: &NewIpdPatient) -> AppResult<()> {
        let d = &data.demographics;
        sqlx::query(
            "INSERT INTO ipd_patients (registration_number, first_name, last_name, father_name, \
             abha_number, age, gender, mobile_number, email, address, post_office, town, state, \
             medical_department, police_case, bed_number, room_number, admission_date, \
             discharge_date, notes, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, \
             $18, $19, $20, $21)",
        )
        .bind(registration_number)
        .bind(&d.first_name)
        .bind(&d.last_name)
        .bind(&d.father_name)
        .bind(&d.abha_number)
        .bind(d.age)
        .bind(&d.gender)
        .bind(&d.mobile_number)
        .bind(&d.email)
        .bind(&d.address)
        .bind(&d.post_office)
        .bind(&d.town)
        .bind(&d.state)
        .bind(&data.medical_department)
        .bind(data.police_case)
        .bind(&data.bed_number)
        .bind(&data.room_number)
        .bind(data.admission_date)
        .bind(data.discharge_date)
        .bind(&data.notes)
        .bind(&data.created_by)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to insert IPD patient", e)
        })?;
        Ok(())
    }

    /// Fetch an outpatient record by registration number (card reprint).
    pub async fn find_opd_by_registration_number(
        &self,
        registration_number: &str,
    ) -> AppResult<Option<OpdPatient>> {
        sqlx::query_as::<_, OpdPatient>(
            "SELECT * FROM opd_patients WHERE registration_number = $1",
        )
        .bind(registration_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find OPD patient", e))
    }

    /// List patients of all categories, paginated, ordered by number.
    pub async fn list(&self, page: &PageRequest) -> AppResult<PageResponse<PatientSummary>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT (SELECT COUNT(*) FROM opd_patients) \
                  + (SELECT COUNT(*) FROM epd_patients) \
                  + (SELECT COUNT(*) FROM ipd_patients)",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count patients", e))?;

        let sql = format!(
            "SELECT * FROM ( \
               SELECT {cols}, 'OPD' AS patient_type, registration_date, medical_department, town, state \
               FROM opd_patients \
               UNION ALL \
               SELECT {cols}, 'EPD', date, medical_department, town, state \
               FROM epd_patients \
               UNION ALL \
               SELECT {cols}, 'IPD', admission_date, medical_department, town, state \
               FROM ipd_patients \
             ) unified \
             ORDER BY registration_number \
             LIMIT $1 OFFSET $2",
            cols = SUMMARY_COLUMNS,
        );

        let patients = sqlx::query_as::<_, PatientSummary>(&sql)
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list patients", e)
            })?;

        Ok(PageResponse::new(
            patients,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Search patients with the given filters, paginated.
    pub async fn search(
        &self,
        filter: &PatientSearchFilter,
        page: &PageRequest,
    ) -> AppResult<Vec<PatientSummary>> {
        let categories: &[PatientCategory] = match filter.category {
            Some(ref c) => std::slice::from_ref(c),
            None => &PatientCategory::ALL,
        };

        let arms: Vec<String> = categories.iter().map(|c| search_arm(*c)).collect();
        let sql = format!(
            "{} ORDER BY registration_number LIMIT $12 OFFSET $13",
            arms.join(" UNION ALL "),
        );

        let like = |s: &str| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                String::new()
            } else {
                format!("%{}%", trimmed.to_lowercase())
            }
        };

        sqlx::query_as::<_, PatientSummary>(&sql)
            .bind(filter.registration_number.trim())
            .bind(like(&filter.name))
            .bind(like(&filter.father_name))
            .bind(filter.phone.trim())
            .bind(filter.department.trim())
            .bind(like(&filter.town))
            .bind(like(&filter.state))
            .bind(filter.gender.trim())
            .bind(filter.age)
            .bind(filter.from_date)
            .bind(filter.to_date)
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to search patients", e)
            })
    }
}

/// One UNION arm of the search query. All arms share the same bind
/// placeholders; only the table, tag, and date column differ.
fn search_arm(category: PatientCategory) -> String {
    let (table, date_col) = match category {
        PatientCategory::Opd => ("opd_patients", "registration_date"),
        PatientCategory::Epd => ("epd_patients", "date"),
        PatientCategory::Ipd => ("ipd_patients", "admission_date"),
    };
    format!(
        "SELECT {cols}, '{tag}' AS patient_type, {date_col} AS registration_date, \
                medical_department, town, state \
         FROM {table} \
         WHERE ($1 = '' OR registration_number = $1) \
           AND ($2 = '' OR LOWER(first_name) LIKE $2 OR LOWER(last_name) LIKE $2) \
           AND ($3 = '' OR LOWER(father_name) LIKE $3) \
           AND ($4 = '' OR mobile_number = $4) \
           AND ($5 = '' OR medical_department = $5) \
           AND ($6 = '' OR LOWER(town) LIKE $6) \
           AND ($7 = '' OR LOWER(state) LIKE $7) \
           AND ($8 = '' OR gender = $8) \
           AND ($9::int IS NULL OR age BETWEEN $9 - 2 AND $9 + 2) \
           AND ($10::date IS NULL OR {date_col} >= $10) \
           AND ($11::date IS NULL OR {date_col} <= $11)",
        cols = SUMMARY_COLUMNS,
        tag = category.prefix(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_arm_uses_category_date_column() {
        let arm = search_arm(PatientCategory::Ipd);
        assert!(arm.contains("FROM ipd_patients"));
        assert!(arm.contains("admission_date AS registration_date"));
        assert!(arm.contains("'IPD' AS patient_type"));
    }
}
