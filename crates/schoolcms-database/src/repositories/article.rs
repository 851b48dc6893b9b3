//! Article repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use schoolcms_core::error::AppError;
use schoolcms_core::result::AppResult;
use schoolcms_core::traits::Repository;
use schoolcms_core::types::pagination::{PageRequest, PageResponse};
use schoolcms_entity::article::{Article, ArticleQuery, ArticleScope, ArticleStatus};

use crate::connection::store_error;
use crate::store::ArticleStore;

/// PostgreSQL-backed article store.
#[derive(Debug, Clone)]
pub struct ArticleRepository {
    pool: PgPool,
}

impl ArticleRepository {
    /// Create a new article repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// A value bound to a dynamically built `WHERE` clause.
enum Param {
    Uuid(Uuid),
    Status(ArticleStatus),
    Text(String),
}

/// Build the `WHERE` clause and its parameters for an article query.
fn build_filters(query: &ArticleQuery) -> (String, Vec<Param>) {
    let mut conditions = Vec::new();
    let mut params = Vec::new();

    match query.scope {
        ArticleScope::All => {}
        ArticleScope::Published => conditions.push("status = 'published'".to_string()),
        ArticleScope::OwnedOrPublished(owner) => {
            params.push(Param::Uuid(owner));
            conditions.push(format!(
                "(author_id = ${} OR status = 'published')",
                params.len()
            ));
        }
    }
    if let Some(status) = query.status {
        params.push(Param::Status(status));
        conditions.push(format!("status = ${}", params.len()));
    }
    if let Some(author_id) = query.author_id {
        params.push(Param::Uuid(author_id));
        conditions.push(format!("author_id = ${}", params.len()));
    }
    if let Some(ref category) = query.category {
        params.push(Param::Text(category.clone()));
        conditions.push(format!("category = ${}", params.len()));
    }
    if let Some(ref search) = query.search {
        params.push(Param::Text(format!("%{}%", escape_like(search))));
        conditions.push(format!("title ILIKE ${}", params.len()));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };
    (where_clause, params)
}

/// Escape `LIKE` wildcards in user input.
fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[async_trait]
impl Repository<Article, Uuid> for ArticleRepository {
    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<Article>> {
        sqlx::query_as::<_, Article>("SELECT * FROM articles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error("Failed to find article", e))
    }

    async fn create(&self, article: &Article) -> AppResult<Article> {
        sqlx::query_as::<_, Article>(
            "INSERT INTO articles (id, title, slug, content, excerpt, category, tags, status, \
             author_id, approved_by, approved_at, rejected_by, rejected_at, rejection_reason, \
             published_at, first_published_at, version, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, \
             $17, $18, $19) \
             RETURNING *",
        )
        .bind(article.id)
        .bind(&article.title)
        .bind(&article.slug)
        .bind(&article.content)
        .bind(&article.excerpt)
        .bind(&article.category)
        .bind(&article.tags)
        .bind(article.status)
        .bind(article.author_id)
        .bind(article.approved_by)
        .bind(article.approved_at)
        .bind(article.rejected_by)
        .bind(article.rejected_at)
        .bind(&article.rejection_reason)
        .bind(article.published_at)
        .bind(article.first_published_at)
        .bind(article.version)
        .bind(article.created_at)
        .bind(article.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| store_error("Failed to create article", e))
    }

    async fn save(&self, article: &Article) -> AppResult<Article> {
        sqlx::query_as::<_, Article>(
            "UPDATE articles SET title = $2, slug = $3, content = $4, excerpt = $5, \
             category = $6, tags = $7, status = $8, approved_by = $9, approved_at = $10, \
             rejected_by = $11, rejected_at = $12, rejection_reason = $13, published_at = $14, \
             first_published_at = $15, version = $16, updated_at = $17 \
             WHERE id = $1 RETURNING *",
        )
        .bind(article.id)
        .bind(&article.title)
        .bind(&article.slug)
        .bind(&article.content)
        .bind(&article.excerpt)
        .bind(&article.category)
        .bind(&article.tags)
        .bind(article.status)
        .bind(article.approved_by)
        .bind(article.approved_at)
        .bind(article.rejected_by)
        .bind(article.rejected_at)
        .bind(&article.rejection_reason)
        .bind(article.published_at)
        .bind(article.first_published_at)
        .bind(article.version)
        .bind(article.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error("Failed to save article", e))?
        .ok_or_else(|| AppError::not_found(format!("Article {} not found", article.id)))
    }

    async fn delete(&self, id: &Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("Failed to delete article", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> AppResult<u64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM articles")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| store_error("Failed to count articles", e))?;
        Ok(total as u64)
    }
}

#[async_trait]
impl ArticleStore for ArticleRepository {
    async fn find(
        &self,
        query: &ArticleQuery,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Article>> {
        let (where_clause, params) = build_filters(query);
        let next = params.len() + 1;

        let count_sql = format!("SELECT COUNT(*) FROM articles {where_clause}");
        let select_sql = format!(
            "SELECT * FROM articles {where_clause} ORDER BY created_at DESC LIMIT ${next} OFFSET ${}",
            next + 1
        );

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        let mut select_query = sqlx::query_as::<_, Article>(&select_sql);

        for param in &params {
            match param {
                Param::Uuid(v) => {
                    count_query = count_query.bind(*v);
                    select_query = select_query.bind(*v);
                }
                Param::Status(v) => {
                    count_query = count_query.bind(*v);
                    select_query = select_query.bind(*v);
                }
                Param::Text(v) => {
                    count_query = count_query.bind(v.clone());
                    select_query = select_query.bind(v.clone());
                }
            }
        }

        let total = count_query
            .fetch_one(&self.pool)
            .await
            .map_err(|e| store_error("Failed to count articles", e))?;

        let articles = select_query
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| store_error("Failed to list articles", e))?;

        Ok(PageResponse::new(
            articles,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Article>> {
        sqlx::query_as::<_, Article>("SELECT * FROM articles WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error("Failed to find article by slug", e))
    }
}
