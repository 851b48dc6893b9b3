//! Integration tests for bearer authentication and role classification.

mod helpers;

use http::StatusCode;

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/articles", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_malformed_token_is_unauthorized() {
    let app = helpers::TestApp::new();

    let response = app
        .request("GET", "/api/articles", None, Some("not-a-jwt"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    let app = helpers::TestApp::new();
    let mut foreign = app.config.auth.clone();
    foreign.jwt_secret = "someone-else".to_string();
    let token = schoolcms_auth::JwtEncoder::new(&foreign)
        .generate_access_token(uuid::Uuid::new_v4(), "mallory", "administrator")
        .expect("mint");

    let response = app
        .request("GET", "/api/admin/audit", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_role_alias_is_recognised() {
    let app = helpers::TestApp::new();
    let admin = app.user("operator", " Admin ");

    let response = app
        .request("GET", "/api/admin/audit", None, Some(&admin.token))
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
}

#[tokio::test]
async fn test_unknown_role_is_treated_as_author() {
    let app = helpers::TestApp::new();
    let editor = app.user("editor", "editor");

    let response = app
        .request("GET", "/api/admin/audit", None, Some(&editor.token))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "FORBIDDEN");
}

#[tokio::test]
async fn test_public_endpoints_need_no_token() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/public/articles", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["total"], 0);
}

#[tokio::test]
async fn test_health_reports_memory_store() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["store"], "memory");
}
