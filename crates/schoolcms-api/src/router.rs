//! Route definitions for the SchoolCMS HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState`
//! and passes it to all handlers via Axum's `State` extractor.

use axum::Router;
use axum::routing::{get, post};

use crate::handlers;
use crate::state::AppState;

/// Build the Axum router with every route.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(health_routes())
        .merge(public_routes())
        .merge(article_routes())
        .merge(admin_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Liveness
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Anonymous read access to published articles
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/public/articles", get(handlers::public::list_published))
        .route(
            "/public/articles/{slug}",
            get(handlers::public::get_published),
        )
}

/// Authenticated article CRUD and workflow transitions
fn article_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/articles",
            get(handlers::article::list_articles).post(handlers::article::create_article),
        )
        .route(
            "/articles/{id}",
            get(handlers::article::get_article)
                .put(handlers::article::update_article)
                .delete(handlers::article::delete_article),
        )
        .route("/articles/{id}/submit", post(handlers::article::submit))
        .route("/articles/{id}/approve", post(handlers::article::approve))
        .route("/articles/{id}/reject", post(handlers::article::reject))
        .route("/articles/{id}/unpublish", post(handlers::article::unpublish))
        .route("/articles/{id}/history", get(handlers::article::history))
}

/// Administrator tools
fn admin_routes() -> Router<AppState> {
    Router::new().route("/admin/audit", get(handlers::admin::audit::search_audit))
}
