//! Authenticated article handlers: CRUD and the approval workflow.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use schoolcms_core::error::AppError;
use schoolcms_entity::article::Article;
use schoolcms_entity::audit::{AuditLogEntry, AuditResource};
use schoolcms_service::{CreateArticleInput, RejectInput, UpdateArticleInput};

use crate::dto::request::{ArticleListParams, VersionParams};
use crate::dto::response::{ApiResponse, DeletedResponse, PaginatedResponse};
use crate::extractors::{ApiJson, ApiQuery, AuthUser, PaginationParams, parse_uuid};
use crate::state::AppState;

type ArticleResponse = Result<Json<ApiResponse<Article>>, AppError>;

/// GET /api/articles
pub async fn list_articles(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(params): ApiQuery<PaginationParams>,
    ApiQuery(filters): ApiQuery<ArticleListParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<Article>>>, AppError> {
    let page = state
        .article_service
        .list_articles(Some(auth.context()), filters.into(), params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page.into())))
}

/// POST /api/articles
pub async fn create_article(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<CreateArticleInput>,
) -> Result<(StatusCode, Json<ApiResponse<Article>>), AppError> {
    let article = state.article_service.create_article(&auth, req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(article))))
}

/// GET /api/articles/{id}
pub async fn get_article(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ArticleResponse {
    let id = parse_uuid(&id)?;
    let article = state.article_service.get_article(Some(auth.context()), id).await?;
    Ok(Json(ApiResponse::ok(article)))
}

/// PUT /api/articles/{id}
pub async fn update_article(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateArticleInput>,
) -> ArticleResponse {
    let id = parse_uuid(&id)?;
    let article = state.article_service.update_article(&auth, id, req).await?;
    Ok(Json(ApiResponse::ok(article)))
}

/// DELETE /api/articles/{id}
pub async fn delete_article(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ApiQuery(version): ApiQuery<VersionParams>,
) -> Result<Json<ApiResponse<DeletedResponse>>, AppError> {
    let id = parse_uuid(&id)?;
    state
        .article_service
        .delete_article(&auth, id, version.expected_version)
        .await?;
    Ok(Json(ApiResponse::ok(DeletedResponse { id, deleted: true })))
}

/// POST /api/articles/{id}/submit
pub async fn submit(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ApiQuery(version): ApiQuery<VersionParams>,
) -> ArticleResponse {
    let id = parse_uuid(&id)?;
    let article = state
        .article_service
        .submit_for_approval(&auth, id, version.expected_version)
        .await?;
    Ok(Json(ApiResponse::ok(article)))
}

/// POST /api/articles/{id}/approve
pub async fn approve(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ApiQuery(version): ApiQuery<VersionParams>,
) -> ArticleResponse {
    let id = parse_uuid(&id)?;
    let article = state
        .article_service
        .approve(&auth, id, version.expected_version)
        .await?;
    Ok(Json(ApiResponse::ok(article)))
}

/// POST /api/articles/{id}/reject
///
/// Body: `{ "reason"?: string, "expectedVersion"?: number }`.
pub async fn reject(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<RejectInput>,
) -> ArticleResponse {
    let id = parse_uuid(&id)?;
    let article = state.article_service.reject(&auth, id, req).await?;
    Ok(Json(ApiResponse::ok(article)))
}

/// POST /api/articles/{id}/unpublish
pub async fn unpublish(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ApiQuery(version): ApiQuery<VersionParams>,
) -> ArticleResponse {
    let id = parse_uuid(&id)?;
    let article = state
        .article_service
        .unpublish(&auth, id, version.expected_version)
        .await?;
    Ok(Json(ApiResponse::ok(article)))
}

/// GET /api/articles/{id}/history
pub async fn history(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<AuditLogEntry>>>, AppError> {
    let id = parse_uuid(&id)?;
    let page = state
        .audit_service
        .history(&auth, AuditResource::Article, id, params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page.into())))
}
