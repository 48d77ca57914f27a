//! Patient directory CLI commands.

use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use medidesk_core::error::AppError;
use medidesk_core::types::pagination::PageRequest;
use medidesk_database::repositories::patient::PatientRepository;
use medidesk_entity::patient::{PatientCategory, PatientSearchFilter, PatientSummary};
use medidesk_service::patient::PatientDirectory;

use crate::output::{self, OutputFormat};

/// Arguments for patient commands
#[derive(Debug, Args)]
pub struct PatientArgs {
    /// Patient subcommand
    #[command(subcommand)]
    pub command: PatientCommand,
}

/// Patient subcommands
#[derive(Debug, Subcommand)]
pub enum PatientCommand {
    /// List patients across all categories, newest first
    List {
        /// Page number (1-based)
        #[arg(long, default_value_t = 1)]
        page: u64,
        /// Items per page
        #[arg(long, default_value_t = 50)]
        page_size: u64,
    },
    /// Search patients by any combination of filters
    Search {
        /// Exact registration number
        #[arg(long)]
        registration_number: Option<String>,
        /// Substring of first or last name
        #[arg(long)]
        name: Option<String>,
        /// Substring of father's name
        #[arg(long)]
        father_name: Option<String>,
        /// Exact mobile number
        #[arg(long)]
        phone: Option<String>,
        /// Exact department
        #[arg(long)]
        department: Option<String>,
        /// Substring of town
        #[arg(long)]
        town: Option<String>,
        /// Approximate age (matches within two years)
        #[arg(long)]
        age: Option<i32>,
        /// Earliest registration date
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Latest registration date
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Restrict to one category (opd, epd or ipd)
        #[arg(long)]
        category: Option<PatientCategory>,
    },
    /// Show a single outpatient record
    Show {
        /// Registration number, e.g. OPD-000123
        registration_number: String,
    },
}

/// Patient display row for table output
#[derive(Debug, Serialize, Tabled)]
struct PatientRow {
    /// Registration number
    number: String,
    /// Patient name
    name: String,
    /// Category
    category: String,
    /// Age
    age: String,
    /// Gender
    gender: String,
    /// Mobile number
    mobile: String,
    /// Department
    department: String,
    /// Date
    date: String,
}

impl From<&PatientSummary> for PatientRow {
    fn from(p: &PatientSummary) -> Self {
        let name = match &p.last_name {
            Some(last) => format!("{} {}", p.first_name, last),
            None => p.first_name.clone(),
        };
        Self {
            number: p.registration_number.clone(),
            name,
            category: p.patient_type.clone(),
            age: p.age.map(|a| a.to_string()).unwrap_or_default(),
            gender: p.gender.clone().unwrap_or_default(),
            mobile: p.mobile_number.clone().unwrap_or_default(),
            department: p.medical_department.clone().unwrap_or_default(),
            date: p
                .registration_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }
}

/// Execute patient commands
pub async fn execute(
    args: &PatientArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let pool = super::create_db_pool(&config).await?;
    let directory = PatientDirectory::new(Arc::new(PatientRepository::new(pool)));

    match &args.command {
        PatientCommand::List { page, page_size } => {
            let response = directory.list(PageRequest::new(*page, *page_size)).await?;
            let rows: Vec<PatientRow> = response.items.iter().map(PatientRow::from).collect();
            output::print_list(&rows, format);
            if format == OutputFormat::Table {
                println!(
                    "Page {}/{} ({} patients total)",
                    response.page, response.total_pages, response.total_items
                );
            }
        }
        PatientCommand::Search {
            registration_number,
            name,
            father_name,
            phone,
            department,
            town,
            age,
            from,
            to,
            category,
        } => {
            let filter = PatientSearchFilter {
                registration_number: registration_number.clone().unwrap_or_default(),
                name: name.clone().unwrap_or_default(),
                father_name: father_name.clone().unwrap_or_default(),
                phone: phone.clone().unwrap_or_default(),
                department: department.clone().unwrap_or_default(),
                town: town.clone().unwrap_or_default(),
                age: *age,
                from_date: *from,
                to_date: *to,
                category: *category,
                ..PatientSearchFilter::default()
            };

            let matches = directory.search(&filter, PageRequest::default()).await?;
            let rows: Vec<PatientRow> = matches.iter().map(PatientRow::from).collect();
            output::print_list(&rows, format);
        }
        PatientCommand::Show {
            registration_number,
        } => {
            let patient = directory.find_opd(registration_number).await?;
            output::print_item(&patient, format);
        }
    }

    Ok(())
}
