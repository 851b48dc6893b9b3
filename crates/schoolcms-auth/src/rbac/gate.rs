//! The role gate: the single place where a raw role attribute becomes a
//! typed capability.

use schoolcms_entity::user::UserRole;

use crate::jwt::Claims;

/// Role attribute values treated as administrators.
const ADMIN_ROLES: [&str; 2] = ["administrator", "admin"];

/// Classifies principals into workflow roles.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleGate;

impl RoleGate {
    /// Creates a new role gate.
    pub fn new() -> Self {
        Self
    }

    /// Classify a role attribute.
    ///
    /// `administrator` and `admin` (case-insensitive, surrounding
    /// whitespace ignored) are administrators; any other value, including
    /// an empty one, is an author.
    pub fn classify(&self, role: &str) -> UserRole {
        let normalized = role.trim().to_ascii_lowercase();
        if ADMIN_ROLES.contains(&normalized.as_str()) {
            UserRole::Administrator
        } else {
            UserRole::Author
        }
    }

    /// Classify the principal carried by verified claims.
    pub fn classify_claims(&self, claims: &Claims) -> UserRole {
        self.classify(&claims.role)
    }
}
