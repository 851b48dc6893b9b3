//! Principal role classification.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two capabilities the content workflow distinguishes.
///
/// Produced once per request by the role gate; workflow guards match on
/// it exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Unrestricted transition rights.
    Administrator,
    /// Restricted to own content in non-published states.
    Author,
}

impl UserRole {
    /// Check if this role is an administrator.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Administrator)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Administrator => "administrator",
            Self::Author => "author",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = schoolcms_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "administrator" => Ok(Self::Administrator),
            "author" => Ok(Self::Author),
            _ => Err(schoolcms_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: administrator, author"
            ))),
        }
    }
}
