//! Audit log repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use schoolcms_core::result::AppResult;
use schoolcms_core::types::pagination::{PageRequest, PageResponse};
use schoolcms_entity::audit::{
    AuditAction, AuditLogEntry, AuditQuery, AuditResource, AuditStatus, CreateAuditLogEntry,
};

use crate::connection::store_error;
use crate::store::AuditLogStore;

/// Repository for audit log entries.
#[derive(Debug, Clone)]
pub struct AuditLogRepository {
    pool: PgPool,
}

impl AuditLogRepository {
    /// Create a new audit log repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

enum Param {
    Uuid(Uuid),
    Action(AuditAction),
    Resource(AuditResource),
    Status(AuditStatus),
    Time(DateTime<Utc>),
}

fn build_filters(query: &AuditQuery) -> (String, Vec<Param>) {
    let mut conditions = Vec::new();
    let mut params = Vec::new();

    if let Some(actor_id) = query.actor_id {
        params.push(Param::Uuid(actor_id));
        conditions.push(format!("actor_id = ${}", params.len()));
    }
    if let Some(action) = query.action {
        params.push(Param::Action(action));
        conditions.push(format!("action = ${}", params.len()));
    }
    if let Some(resource) = query.resource {
        params.push(Param::Resource(resource));
        conditions.push(format!("resource = ${}", params.len()));
    }
    if let Some(resource_id) = query.resource_id {
        params.push(Param::Uuid(resource_id));
        conditions.push(format!("resource_id = ${}", params.len()));
    }
    if let Some(status) = query.status {
        params.push(Param::Status(status));
        conditions.push(format!("status = ${}", params.len()));
    }
    if let Some(from) = query.from {
        params.push(Param::Time(from));
        conditions.push(format!("created_at >= ${}", params.len()));
    }
    if let Some(to) = query.to {
        params.push(Param::Time(to));
        conditions.push(format!("created_at < ${}", params.len()));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };
    (where_clause, params)
}

macro_rules! bind_all {
    ($query:expr, $params:expr) => {{
        let mut q = $query;
        for param in $params {
            q = match param {
                Param::Uuid(v) => q.bind(*v),
                Param::Action(v) => q.bind(*v),
                Param::Resource(v) => q.bind(*v),
                Param::Status(v) => q.bind(*v),
                Param::Time(v) => q.bind(*v),
            };
        }
        q
    }};
}

#[async_trait]
impl AuditLogStore for AuditLogRepository {
    async fn append(&self, data: &CreateAuditLogEntry) -> AppResult<AuditLogEntry> {
        sqlx::query_as::<_, AuditLogEntry>(
            "INSERT INTO audit_log (actor_id, action, resource, resource_id, details, status, \
             ip_address, user_agent) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(data.actor_id)
        .bind(data.action)
        .bind(data.resource)
        .bind(data.resource_id)
        .bind(&data.details)
        .bind(data.status)
        .bind(&data.ip_address)
        .bind(&data.user_agent)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| store_error("Failed to create audit entry", e))
    }

    async fn search(
        &self,
        query: &AuditQuery,
        page: &PageRequest,
    ) -> AppResult<PageResponse<AuditLogEntry>> {
        let (where_clause, params) = build_filters(query);
        let next = params.len() + 1;

        let count_sql = format!("SELECT COUNT(*) FROM audit_log {where_clause}");
        let select_sql = format!(
            "SELECT * FROM audit_log {where_clause} ORDER BY created_at {} LIMIT ${next} OFFSET ${}",
            query.direction.as_sql(),
            next + 1
        );

        let total = bind_all!(sqlx::query_scalar::<_, i64>(&count_sql), &params)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| store_error("Failed to count audit entries", e))?;

        let entries = bind_all!(sqlx::query_as::<_, AuditLogEntry>(&select_sql), &params)
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| store_error("Failed to search audit log", e))?;

        Ok(PageResponse::new(
            entries,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn count(&self, query: &AuditQuery) -> AppResult<u64> {
        let (where_clause, params) = build_filters(query);
        let sql = format!("SELECT COUNT(*) FROM audit_log {where_clause}");
        let total = bind_all!(sqlx::query_scalar::<_, i64>(&sql), &params)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| store_error("Failed to count audit entries", e))?;
        Ok(total as u64)
    }
}
