//! Patient category enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three patient intake categories, each with its own registration
/// sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatientCategory {
    /// Outpatient department.
    Opd,
    /// Emergency department.
    Epd,
    /// Inpatient department.
    Ipd,
}

impl PatientCategory {
    /// All categories, in intake order.
    pub const ALL: [PatientCategory; 3] = [Self::Opd, Self::Epd, Self::Ipd];

    /// Lowercase key used for the sequence table.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Opd => "opd",
            Self::Epd => "epd",
            Self::Ipd => "ipd",
        }
    }

    /// Uppercase prefix used in displayed registration numbers.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Opd => "OPD",
            Self::Epd => "EPD",
            Self::Ipd => "IPD",
        }
    }
}

impl fmt::Display for PatientCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

impl FromStr for PatientCategory {
    type Err = medidesk_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "opd" => Ok(Self::Opd),
            "epd" => Ok(Self::Epd),
            "ipd" => Ok(Self::Ipd),
            _ => Err(medidesk_core::AppError::validation(format!(
                "Invalid patient category: '{s}'. Expected one of: opd, epd, ipd"
            ))),
        }
    }
}
