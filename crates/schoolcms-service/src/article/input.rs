//! Inputs accepted by the article workflow.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use schoolcms_entity::article::ArticleStatus;

/// Fields for a new article.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticleInput {
    /// Headline.
    #[validate(length(min = 1, max = 200, message = "Title must be 1 to 200 characters"))]
    pub title: String,
    /// HTML body.
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
    /// Summary; derived from the content when absent or blank.
    #[validate(length(max = 500, message = "Excerpt must be at most 500 characters"))]
    pub excerpt: Option<String>,
    /// Category label.
    #[validate(length(max = 100, message = "Category must be at most 100 characters"))]
    pub category: Option<String>,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Partial update of an article. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArticleInput {
    /// New headline.
    #[validate(length(min = 1, max = 200, message = "Title must be 1 to 200 characters"))]
    pub title: Option<String>,
    /// New HTML body.
    #[validate(length(min = 1, message = "Content cannot be empty"))]
    pub content: Option<String>,
    /// New summary; a blank value asks for a derived one.
    #[validate(length(max = 500, message = "Excerpt must be at most 500 characters"))]
    pub excerpt: Option<String>,
    /// New category; a blank value clears it.
    #[validate(length(max = 100, message = "Category must be at most 100 characters"))]
    pub category: Option<String>,
    /// Replacement tag list.
    pub tags: Option<Vec<String>>,
    /// Revision the caller last saw.
    pub expected_version: Option<i64>,
}

impl UpdateArticleInput {
    /// Whether the input carries no field changes at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.excerpt.is_none()
            && self.category.is_none()
            && self.tags.is_none()
    }
}

/// Administrator's rejection of a pending article.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RejectInput {
    /// Reason shown to the author.
    #[validate(length(max = 1000, message = "Reason must be at most 1000 characters"))]
    pub reason: Option<String>,
    /// Revision the caller last saw.
    pub expected_version: Option<i64>,
}

/// User-supplied listing filters, applied inside the caller's visibility.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleFilter {
    /// Exact status.
    pub status: Option<ArticleStatus>,
    /// Exact author.
    pub author_id: Option<Uuid>,
    /// Case-insensitive title substring.
    pub search: Option<String>,
    /// Exact category.
    pub category: Option<String>,
}
