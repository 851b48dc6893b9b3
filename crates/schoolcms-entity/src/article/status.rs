//! Article status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Approval state of an article.
///
/// There is no terminal state: both `Published` and `Rejected` can be
/// left again through further transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "article_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    /// Being written by its author; not visible on the public site.
    Draft,
    /// Submitted and waiting for an administrator's decision.
    Pending,
    /// Approved and visible on the public site.
    Published,
    /// Turned down by an administrator.
    Rejected,
}

impl ArticleStatus {
    /// All statuses, in workflow order.
    pub const ALL: [ArticleStatus; 4] = [
        Self::Draft,
        Self::Pending,
        Self::Published,
        Self::Rejected,
    ];

    /// Whether an author may still edit the article in this status.
    pub fn is_author_editable(&self) -> bool {
        matches!(self, Self::Draft | Self::Rejected)
    }

    /// Whether the article is visible on the public site.
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Published)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Published => "published",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ArticleStatus {
    type Err = schoolcms_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "pending" => Ok(Self::Pending),
            "published" => Ok(Self::Published),
            "rejected" => Ok(Self::Rejected),
            _ => Err(schoolcms_core::AppError::validation(format!(
                "Invalid article status: '{s}'. Expected one of: draft, pending, published, rejected"
            ))),
        }
    }
}
