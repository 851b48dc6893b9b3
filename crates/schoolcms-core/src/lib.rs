//! # schoolcms-core
//!
//! Core crate for SchoolCMS. Contains the generic repository trait,
//! configuration schemas, pagination/sorting types, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other SchoolCMS crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
