//! Audit log search filters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use schoolcms_core::types::SortDirection;

use super::model::{AuditAction, AuditLogEntry, AuditResource, AuditStatus};

/// Filters for searching the audit log. Every field is optional and
/// filters combine with AND.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditQuery {
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
    /// Inclusive lower bound on `created_at`.
    pub from: Option<DateTime<Utc>>,
    /// Exclusive upper bound on `created_at`.
    pub to: Option<DateTime<Utc>>,
    /// Ordering by `created_at`; newest first by default.
    #[serde(default)]
    pub direction: SortDirection,
}

impl AuditQuery {
    /// All entries for one entity.
    pub fn for_resource(resource: AuditResource, resource_id: Uuid) -> Self {
        Self {
            resource: Some(resource),
            resource_id: Some(resource_id),
            ..Self::default()
        }
    }

    /// Evaluate the filters against a single entry.
    pub fn matches(&self, entry: &AuditLogEntry) -> bool {
        self.actor_id.is_none_or(|v| v == entry.actor_id)
            && self.action.is_none_or(|v| v == entry.action)
            && self.resource.is_none_or(|v| v == entry.resource)
            && self.resource_id.is_none_or(|v| Some(v) == entry.resource_id)
            && self.status.is_none_or(|v| v == entry.status)
            && self.from.is_none_or(|v| entry.created_at >= v)
            && self.to.is_none_or(|v| entry.created_at < v)
    }
}
