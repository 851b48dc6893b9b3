//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use schoolcms_auth::{JwtDecoder, RoleGate};
use schoolcms_core::config::AppConfig;
use schoolcms_database::{ArticleStore, AuditLogStore, DatabasePool};
use schoolcms_service::{ArticleService, AuditRecorder, AuditService, ContentRules};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are cheap to clone across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL pool, absent when running on the in-memory store
    pub db_pool: Option<DatabasePool>,

    // ── Auth ─────────────────────────────────────────────────
    /// Bearer token verification
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Principal classification
    pub role_gate: RoleGate,

    // ── Services ─────────────────────────────────────────────
    /// Article approval workflow
    pub article_service: Arc<ArticleService>,
    /// Audit log viewer
    pub audit_service: Arc<AuditService>,
}

impl AppState {
    /// Wire services over the given stores.
    pub fn new(
        config: AppConfig,
        articles: Arc<dyn ArticleStore>,
        audit: Arc<dyn AuditLogStore>,
        db_pool: Option<DatabasePool>,
    ) -> Self {
        let recorder = AuditRecorder::new(Arc::clone(&audit));
        let article_service = Arc::new(ArticleService::new(
            articles,
            recorder,
            ContentRules::new(&config.content),
        ));
        let audit_service = Arc::new(AuditService::new(audit));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

        Self {
            config: Arc::new(config),
            db_pool,
            jwt_decoder,
            role_gate: RoleGate::new(),
            article_service,
            audit_service,
        }
    }
}
