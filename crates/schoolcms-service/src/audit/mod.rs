//! Audit trail recording and querying.

pub mod recorder;
pub mod service;

pub use recorder::{AuditEvent, AuditRecorder};
pub use service::AuditService;
