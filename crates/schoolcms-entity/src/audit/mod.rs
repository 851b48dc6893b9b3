//! Audit log entities.

pub mod model;
pub mod query;

pub use model::{AuditAction, AuditLogEntry, AuditResource, AuditStatus, CreateAuditLogEntry};
pub use query::AuditQuery;
