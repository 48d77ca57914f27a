//! Registration number value type.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::PatientCategory;

/// A registration number issued by the sequence allocator.
///
/// Carries the category and the raw counter value as a typed pair so a
/// number can never be confused with an error sentinel. The displayed
/// form is what patient records and printed cards carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegistrationNumber {
    /// The category whose sequence issued this number.
    pub category: PatientCategory,
    /// The allocated counter value.
    pub value: i64,
}

impl RegistrationNumber {
    /// Create a registration number from an allocated counter value.
    pub fn new(category: PatientCategory, value: i64) -> Self {
        Self { category, value }
    }
}

impl fmt::Display for RegistrationNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:06}", self.category.prefix(), self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_format() {
        let number = RegistrationNumber::new(PatientCategory::Opd, 123);
        assert_eq!(number.to_string(), "OPD-000123");
    }

    #[test]
    fn test_display_wide_value() {
        let number = RegistrationNumber::new(PatientCategory::Ipd, 1_234_567);
        assert_eq!(number.to_string(), "IPD-1234567");
    }
}
