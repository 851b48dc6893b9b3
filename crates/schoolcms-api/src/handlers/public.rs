//! Anonymous read access to published articles.

use axum::Json;
use axum::extract::{Path, State};

use schoolcms_core::error::AppError;
use schoolcms_entity::article::Article;

use crate::dto::request::ArticleListParams;
use crate::dto::response::{ApiResponse, PaginatedResponse};
use crate::extractors::{ApiQuery, PaginationParams};
use crate::state::AppState;

/// GET /api/public/articles
pub async fn list_published(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PaginationParams>,
    ApiQuery(filters): ApiQuery<ArticleListParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<Article>>>, AppError> {
    let page = state
        .article_service
        .list_articles(None, filters.into(), params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page.into())))
}

/// GET /api/public/articles/{slug}
pub async fn get_published(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<Article>>, AppError> {
    let article = state.article_service.get_by_slug(None, &slug).await?;
    Ok(Json(ApiResponse::ok(article)))
}
