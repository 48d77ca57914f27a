//! Password policy enforcement for new accounts.

use medidesk_core::config::auth::AuthConfig;
use medidesk_core::error::AppError;

/// Validates password strength for newly created accounts.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    /// Minimum password length.
    min_length: usize,
}

impl PasswordPolicy {
    /// Creates a new policy from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Validates a password against the configured policy.
    ///
    /// Returns `Ok(())` if the password meets all requirements,
    /// or an error describing the first violation found.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.len() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        if !password.chars().any(|c| c.is_alphabetic()) {
            return Err(AppError::validation(
                "Password must contain at least one letter",
            ));
        }

        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(AppError::validation(
                "Password must contain at least one digit",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> PasswordPolicy {
        PasswordPolicy::new(&AuthConfig::default())
    }

    #[test]
    fn test_accepts_default_admin_password() {
        assert!(policy().validate("admin123").is_ok());
    }

    #[test]
    fn test_rejects_short_password() {
        assert!(policy().validate("abc1").is_err());
    }

    #[test]
    fn test_rejects_letters_only() {
        assert!(policy().validate("abcdefgh").is_err());
    }

    #[test]
    fn test_rejects_digits_only() {
        assert!(policy().validate("12345678").is_err());
    }
}
