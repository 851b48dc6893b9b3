//! Article workflow service.
//!
//! Every mutating operation loads the article, runs its guards, builds the
//! new document, and hands it to [`ArticleService::commit`], which performs
//! the store write and then fires the audit hook exactly once.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

use schoolcms_core::error::AppError;
use schoolcms_core::result::AppResult;
use schoolcms_core::types::pagination::{PageRequest, PageResponse};
use schoolcms_database::ArticleStore;
use schoolcms_entity::article::{Article, ArticleQuery, ArticleScope, ArticleStatus};
use schoolcms_entity::audit::{AuditAction, AuditResource};
use schoolcms_entity::user::UserRole;

use super::content::ContentRules;
use super::input::{ArticleFilter, CreateArticleInput, RejectInput, UpdateArticleInput};
use super::transition::{Transition, guard_delete, guard_edit};
use crate::audit::{AuditEvent, AuditRecorder};
use crate::context::RequestContext;

/// Store write performed by a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Write {
    Insert,
    Save,
    Remove,
}

/// A fully guarded change ready to be committed.
#[derive(Debug)]
struct Mutation {
    write: Write,
    article: Article,
    action: AuditAction,
    details: serde_json::Value,
}

/// Runs the approval workflow over an article store.
#[derive(Debug, Clone)]
pub struct ArticleService {
    /// Document store.
    articles: Arc<dyn ArticleStore>,
    /// Audit trail writer.
    recorder: AuditRecorder,
    /// Slug and excerpt derivation.
    content: ContentRules,
}

impl ArticleService {
    /// Creates a new article service.
    pub fn new(
        articles: Arc<dyn ArticleStore>,
        recorder: AuditRecorder,
        content: ContentRules,
    ) -> Self {
        Self {
            articles,
            recorder,
            content,
        }
    }

    /// Create a draft owned by the caller.
    pub async fn create_article(
        &self,
        ctx: &RequestContext,
        input: CreateArticleInput,
    ) -> AppResult<Article> {
        input.validate()?;
        let title = required_title(&input.title)?;

        let now = Utc::now();
        let id = Uuid::new_v4();
        let article = Article {
            id,
            slug: self.unique_slug(&title, now, id).await?,
            excerpt: self
                .content
                .resolve_excerpt(input.excerpt.as_deref(), &input.content),
            title,
            content: input.content,
            category: normalize_category(input.category),
            tags: normalize_tags(input.tags),
            status: ArticleStatus::Draft,
            author_id: ctx.user_id,
            approved_by: None,
            approved_at: None,
            rejected_by: None,
            rejected_at: None,
            rejection_reason: None,
            published_at: None,
            first_published_at: None,
            version: 1,
            created_at: now,
            updated_at: now,
        };

        let details = json!({
            "title": article.title,
            "slug": article.slug,
            "status": article.status,
        });

        let article = self
            .commit(
                ctx,
                Mutation {
                    write: Write::Insert,
                    article,
                    action: AuditAction::Create,
                    details,
                },
            )
            .await?;

        info!(
            user_id = %ctx.user_id,
            article_id = %article.id,
            slug = %article.slug,
            "Article created"
        );
        Ok(article)
    }

    /// Author sends their draft for review.
    pub async fn submit_for_approval(
        &self,
        ctx: &RequestContext,
        article_id: Uuid,
        expected_version: Option<i64>,
    ) -> AppResult<Article> {
        self.apply_transition(ctx, article_id, Transition::Submit, expected_version, None)
            .await
    }

    /// Administrator publishes a pending article.
    pub async fn approve(
        &self,
        ctx: &RequestContext,
        article_id: Uuid,
        expected_version: Option<i64>,
    ) -> AppResult<Article> {
        self.apply_transition(ctx, article_id, Transition::Approve, expected_version, None)
            .await
    }

    /// Administrator turns down a pending article.
    pub async fn reject(
        &self,
        ctx: &RequestContext,
        article_id: Uuid,
        input: RejectInput,
    ) -> AppResult<Article> {
        self.apply_transition(
            ctx,
            article_id,
            Transition::Reject,
            input.expected_version,
            Some(&input),
        )
        .await
    }

    /// Administrator takes a published article back to draft.
    pub async fn unpublish(
        &self,
        ctx: &RequestContext,
        article_id: Uuid,
        expected_version: Option<i64>,
    ) -> AppResult<Article> {
        self.apply_transition(ctx, article_id, Transition::Unpublish, expected_version, None)
            .await
    }

    /// Edit an article's fields.
    pub async fn update_article(
        &self,
        ctx: &RequestContext,
        article_id: Uuid,
        input: UpdateArticleInput,
    ) -> AppResult<Article> {
        let current = self.load(article_id).await?;
        let next_status = guard_edit(ctx.role, ctx.user_id, &current).inspect_err(|e| {
            debug!(user_id = %ctx.user_id, article_id = %article_id, error = %e, "Edit refused");
        })?;
        input.validate()?;
        if input.is_empty() {
            return Err(AppError::validation("No fields to update"));
        }
        check_version(&current, input.expected_version)?;

        let now = Utc::now();
        let mut next = current.clone();
        let mut changed: Vec<&'static str> = Vec::new();

        if let Some(ref title) = input.title {
            let title = required_title(title)?;
            if title != current.title {
                next.title = title;
                changed.push("title");
                if !current.has_been_published() {
                    next.slug = self.unique_slug(&next.title, now, current.id).await?;
                    changed.push("slug");
                }
            }
        }

        if let Some(content) = input.content {
            if content != current.content {
                next.content = content;
                changed.push("content");
            }
        }

        match input.excerpt {
            Some(ref supplied) => {
                let excerpt = self
                    .content
                    .resolve_excerpt(Some(supplied.as_str()), &next.content);
                if excerpt != current.excerpt {
                    next.excerpt = excerpt;
                    changed.push("excerpt");
                }
            }
            None if next.content != current.content => {
                if current.excerpt == self.content.excerpt(&current.content) {
                    next.excerpt = self.content.excerpt(&next.content);
                    if next.excerpt != current.excerpt {
                        changed.push("excerpt");
                    }
                }
            }
            None => {}
        }

        if let Some(category) = input.category {
            let category = normalize_category(Some(category));
            if category != current.category {
                next.category = category;
                changed.push("category");
            }
        }

        if let Some(tags) = input.tags {
            let tags = normalize_tags(tags);
            if tags != current.tags {
                next.tags = tags;
                changed.push("tags");
            }
        }

        next.status = next_status;
        next.version = current.version + 1;
        next.updated_at = now;

        let mut details = json!({
            "title": next.title,
            "changes": changed,
        });
        if next.status != current.status {
            details["previousStatus"] = json!(current.status);
            details["newStatus"] = json!(next.status);
        }

        let article = self
            .commit(
                ctx,
                Mutation {
                    write: Write::Save,
                    article: next,
                    action: AuditAction::Update,
                    details,
                },
            )
            .await?;

        info!(
            user_id = %ctx.user_id,
            article_id = %article.id,
            status = %article.status,
            "Article updated"
        );
        Ok(article)
    }

    /// Remove an article from the store.
    pub async fn delete_article(
        &self,
        ctx: &RequestContext,
        article_id: Uuid,
        expected_version: Option<i64>,
    ) -> AppResult<()> {
        let current = self.load(article_id).await?;
        guard_delete(ctx.role, ctx.user_id, &current).inspect_err(|e| {
            debug!(user_id = %ctx.user_id, article_id = %article_id, error = %e, "Delete refused");
        })?;
        check_version(&current, expected_version)?;

        let details = json!({
            "title": current.title,
            "slug": current.slug,
            "status": current.status,
        });

        self.commit(
            ctx,
            Mutation {
                write: Write::Remove,
                article: current,
                action: AuditAction::Delete,
                details,
            },
        )
        .await?;

        info!(user_id = %ctx.user_id, article_id = %article_id, "Article deleted");
        Ok(())
    }

    /// Fetch one article the caller is allowed to see.
    ///
    /// Articles outside the caller's visibility are reported as not found.
    pub async fn get_article(
        &self,
        ctx: Option<&RequestContext>,
        article_id: Uuid,
    ) -> AppResult<Article> {
        let article = self.load(article_id).await?;
        visible_or_not_found(ctx, article, || format!("Article {article_id} not found"))
    }

    /// Fetch one article by slug, within the caller's visibility.
    pub async fn get_by_slug(&self, ctx: Option<&RequestContext>, slug: &str) -> AppResult<Article> {
        let article = self
            .articles
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Article '{slug}' not found")))?;
        visible_or_not_found(ctx, article, || format!("Article '{slug}' not found"))
    }

    /// List articles visible to the caller, newest first.
    pub async fn list_articles(
        &self,
        ctx: Option<&RequestContext>,
        filter: ArticleFilter,
        page: PageRequest,
    ) -> AppResult<PageResponse<Article>> {
        let query = ArticleQuery {
            scope: scope_for(ctx),
            status: filter.status,
            author_id: filter.author_id,
            search: filter
                .search
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            category: normalize_category(filter.category),
        };
        self.articles.find(&query, &page).await
    }

    async fn apply_transition(
        &self,
        ctx: &RequestContext,
        article_id: Uuid,
        transition: Transition,
        expected_version: Option<i64>,
        reject: Option<&RejectInput>,
    ) -> AppResult<Article> {
        let current = self.load(article_id).await?;
        transition
            .guard(ctx.role, ctx.user_id, &current)
            .inspect_err(|e| {
                debug!(
                    user_id = %ctx.user_id,
                    article_id = %article_id,
                    transition = transition.name(),
                    error = %e,
                    "Transition refused"
                );
            })?;
        if let Some(input) = reject {
            input.validate()?;
        }
        check_version(&current, expected_version)?;

        let now = Utc::now();
        let mut next = current.clone();
        next.status = transition.target();
        next.version = current.version + 1;
        next.updated_at = now;

        let mut details = json!({
            "title": current.title,
            "previousStatus": current.status,
            "newStatus": next.status,
        });

        match transition {
            Transition::Submit => {}
            Transition::Approve => {
                next.approved_by = Some(ctx.user_id);
                next.approved_at = Some(now);
                if next.published_at.is_none() {
                    next.published_at = Some(now);
                }
                if next.first_published_at.is_none() {
                    next.first_published_at = Some(now);
                }
            }
            Transition::Reject => {
                let reason = reject
                    .and_then(|r| r.reason.as_deref())
                    .map(str::trim)
                    .filter(|r| !r.is_empty())
                    .map(str::to_string);
                next.rejected_by = Some(ctx.user_id);
                next.rejected_at = Some(now);
                details["reason"] = json!(reason);
                next.rejection_reason = reason;
            }
            Transition::Unpublish => {
                next.published_at = None;
            }
        }

        let article = self
            .commit(
                ctx,
                Mutation {
                    write: Write::Save,
                    article: next,
                    action: transition.audit_action(),
                    details,
                },
            )
            .await?;

        info!(
            user_id = %ctx.user_id,
            article_id = %article.id,
            transition = transition.name(),
            from = %current.status,
            to = %article.status,
            "Article transitioned"
        );
        Ok(article)
    }

    /// Perform the store write, then run the audit hook once.
    async fn commit(&self, ctx: &RequestContext, mutation: Mutation) -> AppResult<Article> {
        let Mutation {
            write,
            article,
            action,
            details,
        } = mutation;

        let stored = match write {
            Write::Insert => self.articles.create(&article).await?,
            Write::Save => self.articles.save(&article).await?,
            Write::Remove => {
                if !self.articles.delete(&article.id).await? {
                    return Err(AppError::not_found(format!(
                        "Article {} not found",
                        article.id
                    )));
                }
                article
            }
        };

        self.recorder
            .record_after_commit(
                ctx,
                AuditEvent {
                    action,
                    resource: AuditResource::Article,
                    resource_id: Some(stored.id),
                    details,
                },
            )
            .await;

        Ok(stored)
    }

    /// Slug for `title` at `at`, moving the timestamp forward while the
    /// candidate belongs to another article.
    async fn unique_slug(
        &self,
        title: &str,
        at: chrono::DateTime<Utc>,
        owner: Uuid,
    ) -> AppResult<String> {
        let mut at = at;
        loop {
            let candidate = self.content.slug(title, at);
            match self.articles.find_by_slug(&candidate).await? {
                Some(existing) if existing.id != owner => {
                    at += chrono::Duration::milliseconds(1);
                }
                _ => return Ok(candidate),
            }
        }
    }

    async fn load(&self, article_id: Uuid) -> AppResult<Article> {
        self.articles
            .find_by_id(&article_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Article {article_id} not found")))
    }
}

fn scope_for(ctx: Option<&RequestContext>) -> ArticleScope {
    match ctx.map(|c| (c.role, c.user_id)) {
        None => ArticleScope::Published,
        Some((UserRole::Administrator, _)) => ArticleScope::All,
        Some((UserRole::Author, id)) => ArticleScope::OwnedOrPublished(id),
    }
}

fn visible_or_not_found(
    ctx: Option<&RequestContext>,
    article: Article,
    message: impl FnOnce() -> String,
) -> AppResult<Article> {
    if ArticleQuery::scoped(scope_for(ctx)).matches(&article) {
        Ok(article)
    } else {
        Err(AppError::not_found(message()))
    }
}

fn check_version(article: &Article, expected: Option<i64>) -> AppResult<()> {
    match expected {
        Some(v) if v != article.version => Err(AppError::conflict(format!(
            "Article {} is at version {}, expected {v}",
            article.id, article.version
        ))
        .with_details(json!({ "currentVersion": article.version }))),
        _ => Ok(()),
    }
}

fn required_title(title: &str) -> AppResult<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("Input validation failed")
            .with_details(json!({ "title": ["Title is required"] })));
    }
    Ok(trimmed.to_string())
}

fn normalize_category(category: Option<String>) -> Option<String> {
    category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim().to_string();
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}
