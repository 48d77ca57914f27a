//! Session gate configuration.

use serde::{Deserialize, Serialize};

/// Session gate configuration.
///
/// The timeout is read once at process start and applied uniformly to
/// every authenticate call for the process's lifetime; it is baked into
/// the conditional login-slot update rather than checked separately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Minutes after which an unreleased login lease is considered
    /// expired and may be reclaimed by a new login.
    #[serde(default = "default_timeout_minutes")]
    pub timeout_minutes: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timeout_minutes: default_timeout_minutes(),
        }
    }
}

fn default_timeout_minutes() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeout_is_ten_minutes() {
        assert_eq!(SessionConfig::default().timeout_minutes, 10);
    }
}
