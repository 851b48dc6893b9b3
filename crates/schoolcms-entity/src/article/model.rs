//! Article entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::ArticleStatus;

/// A news article or announcement on the school website.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Unique article identifier. Immutable.
    pub id: Uuid,
    /// Headline.
    pub title: String,
    /// URL slug, unique across all articles.
    pub slug: String,
    /// HTML body.
    pub content: String,
    /// Short plain-text summary shown in listings.
    pub excerpt: String,
    /// Optional category label (e.g. `"pengumuman"`).
    pub category: Option<String>,
    /// Free-form tags.
    pub tags: Vec<String>,
    /// Current approval state.
    pub status: ArticleStatus,
    /// The principal who created the article. Immutable.
    pub author_id: Uuid,
    /// Administrator who last approved the article.
    pub approved_by: Option<Uuid>,
    /// When the article was last approved.
    pub approved_at: Option<DateTime<Utc>>,
    /// Administrator who last rejected the article.
    pub rejected_by: Option<Uuid>,
    /// When the article was last rejected.
    pub rejected_at: Option<DateTime<Utc>>,
    /// Reason given with the last rejection.
    pub rejection_reason: Option<String>,
    /// First publication time of the current publication period.
    ///
    /// Cleared on unpublish; reset on the next approval.
    pub published_at: Option<DateTime<Utc>>,
    /// When the article was approved for the very first time.
    ///
    /// Survives unpublishing, so the public URL stays fixed once issued.
    pub first_published_at: Option<DateTime<Utc>>,
    /// Revision counter, incremented on every save.
    pub version: i64,
    /// When the article was created.
    pub created_at: DateTime<Utc>,
    /// When the article was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Article {
    /// Check whether the given principal created this article.
    pub fn is_owned_by(&self, principal_id: Uuid) -> bool {
        self.author_id == principal_id
    }

    /// Whether the article has ever been published, including earlier
    /// publication periods that were later unpublished.
    ///
    /// Slugs may only be regenerated while this is false.
    pub fn has_been_published(&self) -> bool {
        self.first_published_at.is_some() || self.status == ArticleStatus::Published
    }
}
