//! In-memory article store using a Tokio read/write lock.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use schoolcms_core::error::AppError;
use schoolcms_core::result::AppResult;
use schoolcms_core::traits::Repository;
use schoolcms_core::types::pagination::{PageRequest, PageResponse};
use schoolcms_entity::article::{Article, ArticleQuery};

use crate::store::ArticleStore;

/// In-memory article store.
///
/// Each write holds the lock for its whole check-and-set, so a single
/// document write is atomic. Suitable for single-node deployments only.
#[derive(Debug, Clone, Default)]
pub struct MemoryArticleStore {
    articles: Arc<RwLock<HashMap<Uuid, Article>>>,
}

impl MemoryArticleStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn slug_taken(articles: &HashMap<Uuid, Article>, slug: &str, except: Uuid) -> bool {
    articles
        .values()
        .any(|other| other.id != except && other.slug == slug)
}

#[async_trait]
impl Repository<Article, Uuid> for MemoryArticleStore {
    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<Article>> {
        Ok(self.articles.read().await.get(id).cloned())
    }

    async fn create(&self, article: &Article) -> AppResult<Article> {
        let mut articles = self.articles.write().await;
        if articles.contains_key(&article.id) {
            return Err(AppError::conflict(format!(
                "Article {} already exists",
                article.id
            )));
        }
        if slug_taken(&articles, &article.slug, article.id) {
            return Err(AppError::conflict(format!(
                "Slug '{}' is already in use",
                article.slug
            )));
        }
        articles.insert(article.id, article.clone());
        debug!(article_id = %article.id, "Article inserted");
        Ok(article.clone())
    }

    async fn save(&self, article: &Article) -> AppResult<Article> {
        let mut articles = self.articles.write().await;
        if !articles.contains_key(&article.id) {
            return Err(AppError::not_found(format!(
                "Article {} not found",
                article.id
            )));
        }
        if slug_taken(&articles, &article.slug, article.id) {
            return Err(AppError::conflict(format!(
                "Slug '{}' is already in use",
                article.slug
            )));
        }
        articles.insert(article.id, article.clone());
        Ok(article.clone())
    }

    async fn delete(&self, id: &Uuid) -> AppResult<bool> {
        Ok(self.articles.write().await.remove(id).is_some())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.articles.read().await.len() as u64)
    }
}

#[async_trait]
impl ArticleStore for MemoryArticleStore {
    async fn find(
        &self,
        query: &ArticleQuery,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Article>> {
        let articles = self.articles.read().await;
        let mut matched: Vec<Article> = articles
            .values()
            .filter(|a| query.matches(a))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(PageResponse::from_full(matched, page))
    }

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Article>> {
        Ok(self
            .articles
            .read()
            .await
            .values()
            .find(|a| a.slug == slug)
            .cloned())
    }
}
