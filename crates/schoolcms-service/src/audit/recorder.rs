//! The audit recorder and the post-commit hook built on it.

use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use schoolcms_core::error::{AppError, ErrorKind};
use schoolcms_core::result::AppResult;
use schoolcms_database::AuditLogStore;
use schoolcms_entity::audit::{
    AuditAction, AuditLogEntry, AuditResource, AuditStatus, CreateAuditLogEntry,
};

use crate::context::RequestContext;

/// What a committed mutation reports to the audit trail.
#[derive(Debug, Clone)]
pub struct AuditEvent {
    /// Semantic operation.
    pub action: AuditAction,
    /// Entity type.
    pub resource: AuditResource,
    /// Entity ID, `None` for global actions.
    pub resource_id: Option<Uuid>,
    /// Description of what changed.
    pub details: serde_json::Value,
}

/// Appends entries to the audit log.
#[derive(Debug, Clone)]
pub struct AuditRecorder {
    store: Arc<dyn AuditLogStore>,
}

impl AuditRecorder {
    /// Creates a new recorder.
    pub fn new(store: Arc<dyn AuditLogStore>) -> Self {
        Self { store }
    }

    /// Store a fully populated entry. Only the timestamp and ID are filled
    /// in by the store.
    pub async fn record(&self, entry: &CreateAuditLogEntry) -> AppResult<AuditLogEntry> {
        self.store.append(entry).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Audit,
                format!("Failed to record audit entry: {}", e.message),
                e,
            )
        })
    }

    /// Hook run once after a mutation has been committed.
    ///
    /// A failed write is logged and swallowed; the committed mutation
    /// stands either way.
    pub async fn record_after_commit(
        &self,
        ctx: &RequestContext,
        event: AuditEvent,
    ) -> Option<AuditLogEntry> {
        let entry = CreateAuditLogEntry {
            actor_id: ctx.user_id,
            action: event.action,
            resource: event.resource,
            resource_id: event.resource_id,
            details: event.details,
            status: AuditStatus::Success,
            ip_address: ctx.ip_address.clone(),
            user_agent: ctx.user_agent.clone(),
        };

        match self.record(&entry).await {
            Ok(stored) => {
                debug!(
                    audit_id = %stored.id,
                    action = %stored.action,
                    resource = %stored.resource,
                    "Audit entry recorded"
                );
                Some(stored)
            }
            Err(e) => {
                warn!(
                    actor_id = %entry.actor_id,
                    action = %entry.action,
                    resource = %entry.resource,
                    resource_id = ?entry.resource_id,
                    error = %e,
                    "Audit entry could not be recorded; mutation kept"
                );
                None
            }
        }
    }
}
