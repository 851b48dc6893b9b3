//! # schoolcms-api
//!
//! HTTP API layer for SchoolCMS built on Axum.
//!
//! Provides the public and authenticated article endpoints, the audit log
//! viewer, middleware (logging, CORS, timeouts), extractors, DTOs, and the
//! mapping from [`AppError`](schoolcms_core::AppError) to HTTP responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use state::AppState;
