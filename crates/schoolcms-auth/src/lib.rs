//! # schoolcms-auth
//!
//! Bearer token handling and principal classification for SchoolCMS.
//!
//! ## Modules
//!
//! - `jwt`: claims, token verification, and token minting
//! - `rbac`: the role gate that turns a role attribute into a [`UserRole`]
//!
//! [`UserRole`]: schoolcms_entity::user::UserRole

pub mod jwt;
pub mod rbac;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use rbac::RoleGate;
