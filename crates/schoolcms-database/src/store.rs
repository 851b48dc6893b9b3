//! Store traits consumed by the service layer.
//!
//! The workflow only ever talks to these traits, so the PostgreSQL
//! repositories and the in-memory stores are interchangeable.

use async_trait::async_trait;
use uuid::Uuid;

use schoolcms_core::result::AppResult;
use schoolcms_core::traits::Repository;
use schoolcms_core::types::pagination::{PageRequest, PageResponse};
use schoolcms_entity::article::{Article, ArticleQuery};
use schoolcms_entity::audit::{AuditLogEntry, AuditQuery, CreateAuditLogEntry};

/// Document store for articles.
#[async_trait]
pub trait ArticleStore: Repository<Article, Uuid> + std::fmt::Debug {
    /// List articles matching the query, newest first.
    async fn find(
        &self,
        query: &ArticleQuery,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Article>>;

    /// Find an article by its slug.
    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Article>>;
}

/// Append-only store for audit entries.
///
/// Entries can never be updated or removed through this trait.
#[async_trait]
pub trait AuditLogStore: Send + Sync + std::fmt::Debug + 'static {
    /// Append a new entry, stamping its identifier and timestamp.
    async fn append(&self, entry: &CreateAuditLogEntry) -> AppResult<AuditLogEntry>;

    /// Search entries with filters and pagination.
    async fn search(
        &self,
        query: &AuditQuery,
        page: &PageRequest,
    ) -> AppResult<PageResponse<AuditLogEntry>>;

    /// Count entries matching the filters.
    async fn count(&self, query: &AuditQuery) -> AppResult<u64>;
}
