//! Query-string DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use schoolcms_core::types::SortDirection;
use schoolcms_entity::article::ArticleStatus;
use schoolcms_entity::audit::{AuditAction, AuditQuery, AuditResource, AuditStatus};
use schoolcms_service::ArticleFilter;

/// Filters for article listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleListParams {
    /// Exact status.
    pub status: Option<ArticleStatus>,
    /// Exact author.
    pub author_id: Option<Uuid>,
    /// Title substring.
    pub search: Option<String>,
    /// Exact category.
    pub category: Option<String>,
}

impl From<ArticleListParams> for ArticleFilter {
    fn from(params: ArticleListParams) -> Self {
        Self {
            status: params.status,
            author_id: params.author_id,
            search: params.search,
            category: params.category,
        }
    }
}

/// Optimistic-concurrency token for body-less workflow actions.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct VersionParams {
    /// Revision the caller last saw.
    #[serde(alias = "expectedVersion")]
    pub expected_version: Option<i64>,
}

/// Audit log search filters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditSearchParams {
    /// Exact actor.
    pub actor_id: Option<Uuid>,
    /// Exact action.
    pub action: Option<AuditAction>,
    /// Exact resource type.
    pub resource: Option<AuditResource>,
    /// Exact resource ID.
    pub resource_id: Option<Uuid>,
    /// Exact outcome.
    pub status: Option<AuditStatus>,
    /// Inclusive lower bound (RFC 3339).
    pub from: Option<DateTime<Utc>>,
    /// Exclusive upper bound (RFC 3339).
    pub to: Option<DateTime<Utc>>,
    /// `asc` or `desc` (default).
    pub direction: Option<SortDirection>,
}

impl From<AuditSearchParams> for AuditQuery {
    fn from(params: AuditSearchParams) -> Self {
        Self {
            actor_id: params.actor_id,
            action: params.action,
            resource: params.resource,
            resource_id: params.resource_id,
            status: params.status,
            from: params.from,
            to: params.to,
            direction: params.direction.unwrap_or_default(),
        }
    }
}
