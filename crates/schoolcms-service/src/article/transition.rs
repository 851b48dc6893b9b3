//! The article approval state machine.
//!
//! Guards are evaluated in a fixed order: role and ownership first
//! (`Forbidden`), then the current status (`InvalidTransition`). Nothing in
//! this module touches a store, so every failure here happens before any
//! mutation.

use uuid::Uuid;

use schoolcms_core::error::AppError;
use schoolcms_core::result::AppResult;
use schoolcms_entity::article::{Article, ArticleStatus};
use schoolcms_entity::audit::AuditAction;
use schoolcms_entity::user::UserRole;

/// A guarded change of an article's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Author sends a draft for review.
    Submit,
    /// Administrator publishes a pending article.
    Approve,
    /// Administrator turns down a pending article.
    Reject,
    /// Administrator takes a published article back to draft.
    Unpublish,
}

impl Transition {
    /// Operation name used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Submit => "submit",
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Unpublish => "unpublish",
        }
    }

    /// Statuses the transition may start from.
    pub fn sources(&self) -> &'static [ArticleStatus] {
        match self {
            Self::Submit => &[ArticleStatus::Draft],
            Self::Approve | Self::Reject => &[ArticleStatus::Pending],
            Self::Unpublish => &[ArticleStatus::Published],
        }
    }

    /// Status after a successful transition.
    pub fn target(&self) -> ArticleStatus {
        match self {
            Self::Submit => ArticleStatus::Pending,
            Self::Approve => ArticleStatus::Published,
            Self::Reject => ArticleStatus::Rejected,
            Self::Unpublish => ArticleStatus::Draft,
        }
    }

    /// Audit action recorded for the transition.
    ///
    /// Status changes other than a rejection are recorded as `update`; the
    /// entry's `newStatus` detail says which one it was.
    pub fn audit_action(&self) -> AuditAction {
        match self {
            Self::Submit | Self::Approve | Self::Unpublish => AuditAction::Update,
            Self::Reject => AuditAction::Reject,
        }
    }

    /// Check role and ownership.
    pub fn authorize(&self, role: UserRole, actor: Uuid, article: &Article) -> AppResult<()> {
        match self {
            Self::Submit => {
                if article.is_owned_by(actor) {
                    Ok(())
                } else {
                    Err(AppError::forbidden(
                        "Only the article's author can submit it for approval",
                    ))
                }
            }
            Self::Approve | Self::Reject | Self::Unpublish => match role {
                UserRole::Administrator => Ok(()),
                UserRole::Author => Err(AppError::forbidden(format!(
                    "Only administrators can {} articles",
                    self.name()
                ))),
            },
        }
    }

    /// Check that the transition applies to the current status.
    pub fn check_source(&self, current: ArticleStatus) -> AppResult<()> {
        if self.sources().contains(&current) {
            Ok(())
        } else {
            Err(AppError::invalid_transition(format!(
                "Cannot {} an article that is {current}; allowed from: {}",
                self.name(),
                self.sources()
                    .iter()
                    .map(ArticleStatus::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            )))
        }
    }

    /// Run every guard for this transition.
    pub fn guard(&self, role: UserRole, actor: Uuid, article: &Article) -> AppResult<()> {
        self.authorize(role, actor, article)?;
        self.check_source(article.status)
    }
}

/// Guard an edit and return the status the article has afterwards.
///
/// Administrators may edit in any status without changing it. Authors may
/// edit only their own `draft` or `rejected` articles; editing a rejected
/// article returns it to `draft` so it can be resubmitted.
pub fn guard_edit(role: UserRole, actor: Uuid, article: &Article) -> AppResult<ArticleStatus> {
    match role {
        UserRole::Administrator => Ok(article.status),
        UserRole::Author => {
            if !article.is_owned_by(actor) {
                return Err(AppError::forbidden("You can only edit your own articles"));
            }
            if article.status.is_author_editable() {
                Ok(ArticleStatus::Draft)
            } else {
                Err(AppError::forbidden(format!(
                    "Authors cannot edit an article that is {}",
                    article.status
                )))
            }
        }
    }
}

/// Guard a delete.
///
/// Administrators may delete in any status. Authors may delete only their
/// own articles, and never a published one.
pub fn guard_delete(role: UserRole, actor: Uuid, article: &Article) -> AppResult<()> {
    match role {
        UserRole::Administrator => Ok(()),
        UserRole::Author => {
            if !article.is_owned_by(actor) {
                return Err(AppError::forbidden("You can only delete your own articles"));
            }
            if article.status == ArticleStatus::Published {
                return Err(AppError::forbidden(
                    "Published articles can only be deleted by an administrator",
                ));
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use schoolcms_core::error::ErrorKind;

    use super::*;

    fn article(author: Uuid, status: ArticleStatus) -> Article {
        let now = Utc::now();
        Article {
            id: Uuid::new_v4(),
            title: "Judul".to_string(),
            slug: "judul-1".to_string(),
            content: "<p>Isi</p>".to_string(),
            excerpt: "Isi...".to_string(),
            category: None,
            tags: Vec::new(),
            status,
            author_id: author,
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
        }
    }

    #[test]
    fn test_every_target_is_reachable_from_its_sources_only() {
        let author = Uuid::new_v4();
        for transition in [
            Transition::Submit,
            Transition::Approve,
            Transition::Reject,
            Transition::Unpublish,
        ] {
            for status in ArticleStatus::ALL {
                let doc = article(author, status);
                let result = transition.guard(UserRole::Administrator, author, &doc);
                assert_eq!(
                    result.is_ok(),
                    transition.sources().contains(&status),
                    "{} from {status}",
                    transition.name()
                );
            }
        }
    }

    #[test]
    fn test_audit_actions() {
        assert_eq!(Transition::Submit.audit_action(), AuditAction::Update);
        assert_eq!(Transition::Approve.audit_action(), AuditAction::Update);
        assert_eq!(Transition::Unpublish.audit_action(), AuditAction::Update);
        assert_eq!(Transition::Reject.audit_action(), AuditAction::Reject);
    }

    #[test]
    fn test_author_cannot_reach_published_directly() {
        let author = Uuid::new_v4();
        for status in ArticleStatus::ALL {
            let doc = article(author, status);
            let err = Transition::Approve
                .guard(UserRole::Author, author, &doc)
                .unwrap_err();
            assert_eq!(err.kind, ErrorKind::Authorization);
        }
    }

    #[test]
    fn test_forbidden_is_checked_before_status() {
        let doc = article(Uuid::new_v4(), ArticleStatus::Pending);
        let err = Transition::Submit
            .guard(UserRole::Author, Uuid::new_v4(), &doc)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }

    #[test]
    fn test_resubmitting_pending_is_invalid_transition() {
        let author = Uuid::new_v4();
        let doc = article(author, ArticleStatus::Pending);
        let err = Transition::Submit
            .guard(UserRole::Author, author, &doc)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidTransition);
    }

    #[test]
    fn test_rejected_cannot_be_submitted_directly() {
        let author = Uuid::new_v4();
        let doc = article(author, ArticleStatus::Rejected);
        let err = Transition::Submit
            .guard(UserRole::Author, author, &doc)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidTransition);
    }

    #[test]
    fn test_author_edit_rules() {
        let author = Uuid::new_v4();
        assert_eq!(
            guard_edit(UserRole::Author, author, &article(author, ArticleStatus::Rejected)).unwrap(),
            ArticleStatus::Draft
        );
        for status in [ArticleStatus::Pending, ArticleStatus::Published] {
            let err = guard_edit(UserRole::Author, author, &article(author, status)).unwrap_err();
            assert_eq!(err.kind, ErrorKind::Authorization);
        }
        let err = guard_edit(
            UserRole::Author,
            Uuid::new_v4(),
            &article(author, ArticleStatus::Draft),
        )
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }

    #[test]
    fn test_admin_edit_keeps_status() {
        for status in ArticleStatus::ALL {
            let doc = article(Uuid::new_v4(), status);
            assert_eq!(
                guard_edit(UserRole::Administrator, Uuid::new_v4(), &doc).unwrap(),
                status
            );
        }
    }

    #[test]
    fn test_non_admin_never_deletes_published() {
        let author = Uuid::new_v4();
        let doc = article(author, ArticleStatus::Published);
        assert!(guard_delete(UserRole::Author, author, &doc).is_err());
        assert!(guard_delete(UserRole::Administrator, Uuid::new_v4(), &doc).is_ok());
        assert!(guard_delete(UserRole::Author, author, &article(author, ArticleStatus::Pending)).is_ok());
    }
}
