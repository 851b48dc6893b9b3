//! Request context carrying the classified principal and client metadata.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use schoolcms_entity::user::UserRole;

/// Context for the current authenticated request.
///
/// Built by the API layer after the role gate has classified the
/// principal, then passed into every service method so that each
/// operation knows who is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The principal's ID.
    pub user_id: Uuid,
    /// The principal's classified role.
    pub role: UserRole,
    /// The username (convenience field from JWT claims).
    pub username: String,
    /// IP address of the request origin.
    pub ip_address: Option<String>,
    /// User-Agent header value.
    pub user_agent: Option<String>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, role: UserRole, username: impl Into<String>) -> Self {
        Self {
            user_id,
            role,
            username: username.into(),
            ip_address: None,
            user_agent: None,
        }
    }

    /// Attach client metadata recorded with audit entries.
    pub fn with_client(mut self, ip_address: Option<String>, user_agent: Option<String>) -> Self {
        self.ip_address = ip_address;
        self.user_agent = user_agent;
        self
    }

    /// Returns whether the principal is an administrator.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
