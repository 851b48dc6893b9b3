//! PostgreSQL repository implementations for SchoolCMS entities.

pub mod article;
pub mod audit;

pub use article::ArticleRepository;
pub use audit::AuditLogRepository;
