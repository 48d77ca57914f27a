//! Convenience result type alias for MediDesk.

use crate::error::AppError;

/// A specialized `Result` type for MediDesk operations.
pub type AppResult<T> = Result<T, AppError>;
