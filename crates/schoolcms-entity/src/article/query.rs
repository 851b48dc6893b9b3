//! Article listing filters.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model::Article;
use super::status::ArticleStatus;

/// Which articles a listing may return, before user filters apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ArticleScope {
    /// Every article regardless of status (administrators).
    All,
    /// Only published articles (anonymous visitors).
    #[default]
    Published,
    /// The principal's own articles in any status plus everyone's published ones.
    OwnedOrPublished(Uuid),
}

/// Filters for listing articles. All filters are conjunctive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleQuery {
    /// Visibility boundary.
    pub scope: ArticleScope,
    /// Exact status.
    pub status: Option<ArticleStatus>,
    /// Exact author.
    pub author_id: Option<Uuid>,
    /// Case-insensitive substring of the title.
    pub search: Option<String>,
    /// Exact category.
    pub category: Option<String>,
}

impl ArticleQuery {
    /// Query bounded by the given scope with no further filters.
    pub fn scoped(scope: ArticleScope) -> Self {
        Self {
            scope,
            ..Self::default()
        }
    }

    /// Evaluate the query against a single article.
    pub fn matches(&self, article: &Article) -> bool {
        let in_scope = match self.scope {
            ArticleScope::All => true,
            ArticleScope::Published => article.status.is_public(),
            ArticleScope::OwnedOrPublished(owner) => {
                article.is_owned_by(owner) || article.status.is_public()
            }
        };
        if !in_scope {
            return false;
        }
        if self.status.is_some_and(|s| s != article.status) {
            return false;
        }
        if self.author_id.is_some_and(|a| a != article.author_id) {
            return false;
        }
        if let Some(ref category) = self.category {
            if article.category.as_deref() != Some(category.as_str()) {
                return false;
            }
        }
        if let Some(ref search) = self.search {
            let needle = search.to_lowercase();
            if !article.title.to_lowercase().contains(&needle) {
                return false;
            }
        }
        true
    }
}
