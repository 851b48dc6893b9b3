//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use schoolcms_api::{AppState, build_app};
use schoolcms_auth::JwtEncoder;
use schoolcms_core::config::{AppConfig, StoreBackend};
use schoolcms_database::{MemoryArticleStore, MemoryAuditLogStore};

/// A signed-in principal for test requests.
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: Uuid,
    pub username: String,
    pub token: String,
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
    encoder: JwtEncoder,
}

impl TestApp {
    /// Create a new test application backed by the in-memory stores.
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.store.backend = StoreBackend::Memory;
        config.auth.jwt_secret = "integration-test-secret".to_string();

        let state = AppState::new(
            config.clone(),
            Arc::new(MemoryArticleStore::new()),
            Arc::new(MemoryAuditLogStore::new()),
            None,
        );
        let encoder = JwtEncoder::new(&config.auth);

        Self {
            router: build_app(state),
            config,
            encoder,
        }
    }

    /// Mint a token for a fresh user with the given role attribute.
    pub fn user(&self, username: &str, role: &str) -> TestUser {
        let id = Uuid::new_v4();
        let token = self
            .encoder
            .generate_access_token(id, username, role)
            .expect("Failed to mint token");
        TestUser {
            id,
            username: username.to_string(),
            token,
        }
    }

    pub fn admin(&self) -> TestUser {
        self.user("kepsek", "administrator")
    }

    pub fn author(&self, username: &str) -> TestUser {
        self.user(username, "author")
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .header("User-Agent", "schoolcms-tests")
            .header("X-Forwarded-For", "198.51.100.23");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Create a draft as `author` and return its JSON.
    pub async fn create_article(&self, author: &TestUser, title: &str) -> Value {
        let response = self
            .request(
                "POST",
                "/api/articles",
                Some(serde_json::json!({
                    "title": title,
                    "content": "<p>Pengumuman untuk seluruh siswa dan orang tua.</p>",
                    "category": "pengumuman",
                    "tags": ["sekolah"],
                })),
                Some(&author.token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["data"].clone()
    }

    /// Drive an article from creation to published.
    pub async fn publish_article(&self, author: &TestUser, admin: &TestUser, title: &str) -> Value {
        let article = self.create_article(author, title).await;
        let id = article["id"].as_str().expect("id");

        let submitted = self
            .request("POST", &format!("/api/articles/{id}/submit"), None, Some(&author.token))
            .await;
        assert_eq!(submitted.status, StatusCode::OK, "{:?}", submitted.body);

        let approved = self
            .request("POST", &format!("/api/articles/{id}/approve"), None, Some(&admin.token))
            .await;
        assert_eq!(approved.status, StatusCode::OK, "{:?}", approved.body);
        approved.body["data"].clone()
    }
}

/// Simplified test response
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}
