//! # schoolcms-service
//!
//! Business logic for SchoolCMS: the article approval workflow, the audit
//! recorder that every workflow mutation reports to, and the audit log
//! viewer.
//!
//! Services follow constructor injection; stores are provided at
//! construction time as `Arc` trait objects.

pub mod article;
pub mod audit;
pub mod context;

pub use article::{
    ArticleFilter, ArticleService, ContentRules, CreateArticleInput, RejectInput, Transition,
    UpdateArticleInput,
};
pub use audit::{AuditEvent, AuditRecorder, AuditService};
pub use context::RequestContext;
