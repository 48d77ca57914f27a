//! Patient registration commands.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand};

use medidesk_core::error::AppError;
use medidesk_database::repositories::patient::PatientRepository;
use medidesk_database::repositories::sequence::SequenceRepository;
use medidesk_entity::patient::{
    NewEpdPatient, NewIpdPatient, NewOpdPatient, PatientDemographics,
};
use medidesk_service::registration::{RegistrationService, SequenceAllocator};

use crate::output;

/// Arguments for register commands
#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Register subcommand
    #[command(subcommand)]
    pub command: RegisterCommand,
}

/// Demographic flags shared by the three categories
#[derive(Debug, Args)]
pub struct DemographicArgs {
    /// Given name
    #[arg(long)]
    pub first_name: String,
    /// Family name
    #[arg(long)]
    pub last_name: Option<String>,
    /// Father's name
    #[arg(long)]
    pub father_name: Option<String>,
    /// Age in years
    #[arg(long)]
    pub age: Option<i32>,
    /// Gender
    #[arg(long)]
    pub gender: Option<String>,
    /// Mobile number
    #[arg(long)]
    pub mobile: Option<String>,
    /// Town or village
    #[arg(long)]
    pub town: Option<String>,
    /// State
    #[arg(long)]
    pub state: Option<String>,
}

impl DemographicArgs {
    fn to_demographics(&self) -> PatientDemographics {
        PatientDemographics {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            father_name: self.father_name.clone(),
            age: self.age,
            gender: self.gender.clone(),
            mobile_number: self.mobile.clone(),
            town: self.town.clone(),
            state: self.state.clone(),
            ..PatientDemographics::default()
        }
    }
}

/// Register subcommands
#[derive(Debug, Subcommand)]
pub enum RegisterCommand {
    /// Register an outpatient
    Opd {
        #[command(flatten)]
        demographics: DemographicArgs,
        /// Department the patient is referred to
        #[arg(long)]
        department: Option<String>,
        /// Registration fee
        #[arg(long)]
        fee: Option<f64>,
        /// Registration date (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Register an emergency patient
    Epd {
        #[command(flatten)]
        demographics: DemographicArgs,
        /// Department the patient is referred to
        #[arg(long)]
        department: Option<String>,
        /// Type of emergency
        #[arg(long)]
        emergency_type: Option<String>,
        /// Registration date (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Admit an inpatient
    Ipd {
        #[command(flatten)]
        demographics: DemographicArgs,
        /// Admitting department
        #[arg(long)]
        department: Option<String>,
        /// Bed number
        #[arg(long)]
        bed: Option<String>,
        /// Admission date (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

/// Execute register commands
pub async fn execute(args: &RegisterArgs, config_path: &str) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let pool = super::create_db_pool(&config).await?;
    let service = RegistrationService::new(
        SequenceAllocator::new(Arc::new(SequenceRepository::new(pool.clone()))),
        Arc::new(PatientRepository::new(pool)),
    );
    let today = Local::now().date_naive();

    match &args.command {
        RegisterCommand::Opd {
            demographics,
            department,
            fee,
            date,
        } => {
            let number = service
                .register_opd(&NewOpdPatient {
                    demographics: demographics.to_demographics(),
                    registration_fee: *fee,
                    payment_status: None,
                    registration_date: date.unwrap_or(today),
                    medical_department: department.clone(),
                    created_by: None,
                })
                .await?;
            output::print_success(&format!("Registered OPD patient: {}", number));
        }
        RegisterCommand::Epd {
            demographics,
            department,
            emergency_type,
            date,
        } => {
            let number = service
                .register_epd(&NewEpdPatient {
                    demographics: demographics.to_demographics(),
                    medical_department: department.clone(),
                    police_case: None,
                    emergency_type: emergency_type.clone(),
                    arrival_mode: None,
                    arrival_datetime: None,
                    triage_level: None,
                    attending_doctor: None,
                    outcome: None,
                    notes: None,
                    date: date.unwrap_or(today),
                    created_by: None,
                })
                .await?;
            output::print_success(&format!("Registered EPD patient: {}", number));
        }
        RegisterCommand::Ipd {
            demographics,
            department,
            bed,
            date,
        } => {
            let number = service
                .register_ipd(&NewIpdPatient {
                    demographics: demographics.to_demographics(),
                    medical_department: department.clone(),
                    police_case: None,
                    bed_number: bed.clone(),
                    room_number: None,
                    admission_date: date.unwrap_or(today),
                    discharge_date: None,
                    notes: None,
                    created_by: None,
                })
                .await?;
            output::print_success(&format!("Admitted IPD patient: {}", number));
        }
    }

    Ok(())
}
