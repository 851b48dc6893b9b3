//! Audit log handlers.

use axum::Json;
use axum::extract::State;

use schoolcms_core::error::AppError;
use schoolcms_entity::audit::{AuditLogEntry, AuditQuery};

use crate::dto::request::AuditSearchParams;
use crate::dto::response::{ApiResponse, PaginatedResponse};
use crate::extractors::{ApiQuery, AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/admin/audit
pub async fn search_audit(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(params): ApiQuery<PaginationParams>,
    ApiQuery(filters): ApiQuery<AuditSearchParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<AuditLogEntry>>>, AppError> {
    let query = AuditQuery::from(filters);
    let page = state
        .audit_service
        .search(&auth, &query, params.into_page_request())
        .await?;

    Ok(Json(ApiResponse::ok(page.into())))
}
