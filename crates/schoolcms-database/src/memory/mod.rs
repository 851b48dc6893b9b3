//! In-memory stores for single-node development and tests.

pub mod article;
pub mod audit;

pub use article::MemoryArticleStore;
pub use audit::MemoryAuditLogStore;
