//! Convenience result type alias for SchoolCMS.

use crate::error::AppError;

/// A specialized `Result` type for SchoolCMS operations.
pub type AppResult<T> = Result<T, AppError>;
