//! # schoolcms-database
//!
//! Document store abstractions for SchoolCMS together with their
//! PostgreSQL and in-memory implementations, plus connection pool and
//! migration management.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::{MemoryArticleStore, MemoryAuditLogStore};
pub use repositories::{ArticleRepository, AuditLogRepository};
pub use store::{ArticleStore, AuditLogStore};
