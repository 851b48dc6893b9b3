//! In-memory append-only audit log.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use schoolcms_core::result::AppResult;
use schoolcms_core::types::SortDirection;
use schoolcms_core::types::pagination::{PageRequest, PageResponse};
use schoolcms_entity::audit::{AuditLogEntry, AuditQuery, CreateAuditLogEntry};

use crate::store::AuditLogStore;

/// In-memory audit log. Entries are kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryAuditLogStore {
    entries: Arc<RwLock<Vec<AuditLogEntry>>>,
}

impl MemoryAuditLogStore {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuditLogStore for MemoryAuditLogStore {
    async fn append(&self, entry: &CreateAuditLogEntry) -> AppResult<AuditLogEntry> {
        let stored = entry.clone().into_entry(Utc::now());
        self.entries.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn search(
        &self,
        query: &AuditQuery,
        page: &PageRequest,
    ) -> AppResult<PageResponse<AuditLogEntry>> {
        let entries = self.entries.read().await;
        let matched: Vec<AuditLogEntry> = match query.direction {
            SortDirection::Asc => entries.iter().filter(|e| query.matches(e)).cloned().collect(),
            SortDirection::Desc => entries
                .iter()
                .rev()
                .filter(|e| query.matches(e))
                .cloned()
                .collect(),
        };
        Ok(PageResponse::from_full(matched, page))
    }

    async fn count(&self, query: &AuditQuery) -> AppResult<u64> {
        let entries = self.entries.read().await;
        Ok(entries.iter().filter(|e| query.matches(e)).count() as u64)
    }
}
