//! Audit log entry entity model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use schoolcms_core::AppError;

/// What kind of operation an audit entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "audit_action", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    /// A record was created.
    Create,
    /// A record was modified, including plain status changes.
    Update,
    /// A record was removed.
    Delete,
    /// An administrator approved a pending article.
    Approve,
    /// An administrator rejected a pending article.
    Reject,
    /// A principal signed in.
    Login,
    /// A principal signed out.
    Logout,
}

impl AuditAction {
    /// Return the action as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Login => "login",
            Self::Logout => "logout",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AuditAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            "approve" => Ok(Self::Approve),
            "reject" => Ok(Self::Reject),
            "login" => Ok(Self::Login),
            "logout" => Ok(Self::Logout),
            _ => Err(AppError::validation(format!("Invalid audit action: '{s}'"))),
        }
    }
}

/// The entity type an audit entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "audit_resource", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AuditResource {
    /// An article.
    Article,
    /// A user account.
    User,
    /// Global, non-entity actions.
    System,
}

impl AuditResource {
    /// Return the resource as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::User => "user",
            Self::System => "system",
        }
    }
}

impl fmt::Display for AuditResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AuditResource {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "article" => Ok(Self::Article),
            "user" => Ok(Self::User),
            "system" => Ok(Self::System),
            _ => Err(AppError::validation(format!(
                "Invalid audit resource: '{s}'"
            ))),
        }
    }
}

/// Outcome recorded with an audit entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "audit_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AuditStatus {
    /// The operation took effect.
    #[default]
    Success,
    /// The operation was attempted and failed.
    Failed,
}

impl AuditStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failed => "failed",
        }
    }
}

impl FromStr for AuditStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "success" => Ok(Self::Success),
            "failed" => Ok(Self::Failed),
            _ => Err(AppError::validation(format!("Invalid audit status: '{s}'"))),
        }
    }
}

/// An immutable audit log entry recording a principal's action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    /// Unique audit entry identifier.
    pub id: Uuid,
    /// The principal who performed the action.
    pub actor_id: Uuid,
    /// The action that was performed.
    pub action: AuditAction,
    /// The type of target resource.
    pub resource: AuditResource,
    /// The target resource ID; `None` for bulk or global actions.
    pub resource_id: Option<Uuid>,
    /// Structured description of what changed.
    pub details: serde_json::Value,
    /// Whether the action succeeded.
    pub status: AuditStatus,
    /// IP address of the actor.
    pub ip_address: Option<String>,
    /// User-Agent of the actor.
    pub user_agent: Option<String>,
    /// When the action occurred.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new audit log entry.
///
/// Everything except the identifier and timestamp is supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAuditLogEntry {
    /// The principal who performed the action.
    pub actor_id: Uuid,
    /// The action performed.
    pub action: AuditAction,
    /// Target resource type.
    pub resource: AuditResource,
    /// Target resource ID.
    pub resource_id: Option<Uuid>,
    /// Additional details.
    pub details: serde_json::Value,
    /// Outcome.
    pub status: AuditStatus,
    /// Actor's IP address.
    pub ip_address: Option<String>,
    /// Actor's User-Agent.
    pub user_agent: Option<String>,
}

impl CreateAuditLogEntry {
    /// Stamp the entry with an identifier and the given time.
    pub fn into_entry(self, created_at: DateTime<Utc>) -> AuditLogEntry {
        AuditLogEntry {
            id: Uuid::new_v4(),
            actor_id: self.actor_id,
            action: self.action,
            resource: self.resource,
            resource_id: self.resource_id,
            details: self.details,
            status: self.status,
            ip_address: self.ip_address,
            user_agent: self.user_agent,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_vocabulary_parses() {
        for name in ["create", "update", "delete", "approve", "reject", "login", "logout"] {
            let action: AuditAction = name.parse().unwrap();
            assert_eq!(action.as_str(), name);
        }
        assert!("publish".parse::<AuditAction>().is_err());
    }

    #[test]
    fn test_entry_serializes_camel_case() {
        let entry = CreateAuditLogEntry {
            actor_id: Uuid::new_v4(),
            action: AuditAction::Approve,
            resource: AuditResource::Article,
            resource_id: Some(Uuid::new_v4()),
            details: serde_json::json!({ "newStatus": "published" }),
            status: AuditStatus::Success,
            ip_address: None,
            user_agent: None,
        }
        .into_entry(Utc::now());

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["action"], "approve");
        assert_eq!(json["resource"], "article");
        assert!(json.get("resourceId").is_some());
        assert_eq!(json["status"], "success");
    }
}
