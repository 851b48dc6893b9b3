//! Read side of the audit trail.

use std::sync::Arc;

use uuid::Uuid;

use schoolcms_core::error::AppError;
use schoolcms_core::result::AppResult;
use schoolcms_core::types::SortDirection;
use schoolcms_core::types::pagination::{PageRequest, PageResponse};
use schoolcms_database::AuditLogStore;
use schoolcms_entity::audit::{AuditLogEntry, AuditQuery, AuditResource};

use crate::context::RequestContext;

/// Audit log viewer for administrators.
#[derive(Debug, Clone)]
pub struct AuditService {
    store: Arc<dyn AuditLogStore>,
}

impl AuditService {
    /// Creates a new audit service.
    pub fn new(store: Arc<dyn AuditLogStore>) -> Self {
        Self { store }
    }

    /// Search the audit log. Administrators only.
    pub async fn search(
        &self,
        ctx: &RequestContext,
        query: &AuditQuery,
        page: PageRequest,
    ) -> AppResult<PageResponse<AuditLogEntry>> {
        require_admin(ctx)?;
        if let (Some(from), Some(to)) = (query.from, query.to) {
            if from > to {
                return Err(AppError::validation("'from' must not be after 'to'"));
            }
        }
        self.store.search(query, &page).await
    }

    /// Every entry for one entity, oldest first. Administrators only.
    pub async fn history(
        &self,
        ctx: &RequestContext,
        resource: AuditResource,
        resource_id: Uuid,
        page: PageRequest,
    ) -> AppResult<PageResponse<AuditLogEntry>> {
        require_admin(ctx)?;
        let query = AuditQuery {
            direction: SortDirection::Asc,
            ..AuditQuery::for_resource(resource, resource_id)
        };
        self.store.search(&query, &page).await
    }
}

fn require_admin(ctx: &RequestContext) -> AppResult<()> {
    if ctx.is_admin() {
        Ok(())
    } else {
        Err(AppError::forbidden(
            "Only administrators can view the audit log",
        ))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use schoolcms_core::error::ErrorKind;
    use schoolcms_database::MemoryAuditLogStore;
    use schoolcms_entity::audit::{AuditAction, AuditStatus, CreateAuditLogEntry};
    use schoolcms_entity::user::UserRole;

    use super::*;

    async fn seeded() -> (AuditService, Uuid) {
        let store = Arc::new(MemoryAuditLogStore::new());
        let article = Uuid::new_v4();
        for action in [AuditAction::Create, AuditAction::Update, AuditAction::Approve] {
            store
                .append(&CreateAuditLogEntry {
                    actor_id: Uuid::new_v4(),
                    action,
                    resource: AuditResource::Article,
                    resource_id: Some(article),
                    details: serde_json::json!({}),
                    status: AuditStatus::Success,
                    ip_address: None,
                    user_agent: None,
                })
                .await
                .unwrap();
        }
        (AuditService::new(store), article)
    }

    #[tokio::test]
    async fn test_authors_cannot_search() {
        let (service, _) = seeded().await;
        let ctx = RequestContext::new(Uuid::new_v4(), UserRole::Author, "guru1");
        let err = service
            .search(&ctx, &AuditQuery::default(), PageRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }

    #[tokio::test]
    async fn test_history_is_oldest_first() {
        let (service, article) = seeded().await;
        let ctx = RequestContext::new(Uuid::new_v4(), UserRole::Administrator, "admin");
        let page = service
            .history(&ctx, AuditResource::Article, article, PageRequest::default())
            .await
            .unwrap();
        let actions: Vec<_> = page.items.iter().map(|e| e.action).collect();
        assert_eq!(
            actions,
            vec![AuditAction::Create, AuditAction::Update, AuditAction::Approve]
        );
        assert_eq!(page.total_items, 3);
    }

    #[tokio::test]
    async fn test_inverted_range_is_rejected() {
        let (service, _) = seeded().await;
        let ctx = RequestContext::new(Uuid::new_v4(), UserRole::Administrator, "admin");
        let query = AuditQuery {
            from: Some(Utc::now()),
            to: Some(Utc::now() - Duration::hours(1)),
            ..AuditQuery::default()
        };
        let err = service
            .search(&ctx, &query, PageRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
