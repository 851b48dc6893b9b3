//! Query-string extractor that rejects with the API error shape.

use axum::extract::rejection::QueryRejection;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use schoolcms_core::error::AppError;

/// Like [`axum::extract::Query`], but an unparseable query string becomes a
/// `VALIDATION_ERROR` instead of axum's plain-text rejection.
#[derive(Debug, Clone)]
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(reject(rejection)),
        }
    }
}

fn reject(rejection: QueryRejection) -> AppError {
    AppError::validation("Malformed query string")
        .with_details(serde_json::json!({ "query": [rejection.body_text()] }))
}
