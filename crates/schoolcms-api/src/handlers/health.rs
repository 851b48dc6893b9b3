//! Health check handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use schoolcms_core::config::StoreBackend;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<HealthResponse>>) {
    let store = match state.config.store.backend {
        StoreBackend::Postgres => "postgres",
        StoreBackend::Memory => "memory",
    };

    let database = match &state.db_pool {
        Some(pool) => match pool.health_check().await {
            Ok(true) => Some("connected"),
            Ok(false) | Err(_) => Some("unreachable"),
        },
        None => None,
    };

    let (status, code) = if database == Some("unreachable") {
        ("degraded", StatusCode::SERVICE_UNAVAILABLE)
    } else {
        ("ok", StatusCode::OK)
    };

    (
        code,
        Json(ApiResponse::ok(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            store: store.to_string(),
            database: database.map(String::from),
        })),
    )
}
