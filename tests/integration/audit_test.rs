//! Integration tests for the audit trail.

mod helpers;

use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_every_workflow_step_is_recorded() {
    let app = helpers::TestApp::new();
    let author = app.author("bu_rina");
    let admin = app.admin();

    let published = app.publish_article(&author, &admin, "Penerimaan Siswa Baru").await;
    let id = published["id"].as_str().unwrap();

    let history = app
        .request(
            "GET",
            &format!("/api/articles/{id}/history"),
            None,
            Some(&admin.token),
        )
        .await;
    assert_eq!(history.status, StatusCode::OK, "{:?}", history.body);

    let items = history.body["data"]["items"].as_array().unwrap();
    let actions: Vec<&str> = items
        .iter()
        .map(|e| e["action"].as_str().unwrap())
        .collect();
    assert_eq!(actions, ["create", "update", "update"]);

    assert_eq!(items[0]["actorId"], author.id.to_string());
    assert_eq!(items[1]["details"]["newStatus"], "pending");
    assert_eq!(items[2]["actorId"], admin.id.to_string());
    assert_eq!(items[2]["details"]["newStatus"], "published");
    assert_eq!(items[2]["ipAddress"], "198.51.100.23");
    assert_eq!(items[2]["userAgent"], "schoolcms-tests");
    assert!(items.iter().all(|e| e["status"] == "success"));
}

#[tokio::test]
async fn test_rejection_reason_is_recorded() {
    let app = helpers::TestApp::new();
    let author = app.author("bu_rina");
    let admin = app.admin();
    let article = app.create_article(&author, "Beasiswa").await;
    let id = article["id"].as_str().unwrap();
    app.request(
        "POST",
        &format!("/api/articles/{id}/submit"),
        None,
        Some(&author.token),
    )
    .await;
    app.request(
        "POST",
        &format!("/api/articles/{id}/reject"),
        Some(json!({ "reason": "Sertakan syarat pendaftaran" })),
        Some(&admin.token),
    )
    .await;

    let search = app
        .request(
            "GET",
            &format!("/api/admin/audit?action=reject&resource_id={id}"),
            None,
            Some(&admin.token),
        )
        .await;

    assert_eq!(search.status, StatusCode::OK);
    assert_eq!(search.body["data"]["total"], 1);
    assert_eq!(
        search.body["data"]["items"][0]["details"]["reason"],
        "Sertakan syarat pendaftaran"
    );
}

#[tokio::test]
async fn test_forbidden_attempts_leave_no_entry() {
    let app = helpers::TestApp::new();
    let author = app.author("bu_rina");
    let admin = app.admin();
    let article = app.create_article(&author, "Ekstrakurikuler").await;
    let id = article["id"].as_str().unwrap();

    let denied = app
        .request(
            "POST",
            &format!("/api/articles/{id}/approve"),
            None,
            Some(&author.token),
        )
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let search = app
        .request(
            "GET",
            &format!("/api/admin/audit?resource_id={id}"),
            None,
            Some(&admin.token),
        )
        .await;
    assert_eq!(search.body["data"]["total"], 1);
}

#[tokio::test]
async fn test_search_filters_by_actor_and_orders_newest_first() {
    let app = helpers::TestApp::new();
    let first = app.author("bu_rina");
    let second = app.author("pak_budi");
    let admin = app.admin();
    app.create_article(&first, "Satu").await;
    app.create_article(&second, "Dua").await;
    app.create_article(&first, "Tiga").await;

    let by_actor = app
        .request(
            "GET",
            &format!("/api/admin/audit?actor_id={}", first.id),
            None,
            Some(&admin.token),
        )
        .await;
    assert_eq!(by_actor.body["data"]["total"], 2);

    let newest = app
        .request("GET", "/api/admin/audit?per_page=1", None, Some(&admin.token))
        .await;
    assert_eq!(newest.body["data"]["items"][0]["details"]["title"], "Tiga");

    let oldest = app
        .request(
            "GET",
            "/api/admin/audit?per_page=1&direction=asc",
            None,
            Some(&admin.token),
        )
        .await;
    assert_eq!(oldest.body["data"]["items"][0]["details"]["title"], "Satu");
}

#[tokio::test]
async fn test_inverted_time_window_is_rejected() {
    let app = helpers::TestApp::new();
    let admin = app.admin();

    let response = app
        .request(
            "GET",
            "/api/admin/audit?from=2026-02-01T00:00:00Z&to=2026-01-01T00:00:00Z",
            None,
            Some(&admin.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_history_is_admin_only() {
    let app = helpers::TestApp::new();
    let author = app.author("bu_rina");
    let article = app.create_article(&author, "Milik Sendiri").await;
    let id = article["id"].as_str().unwrap();

    let response = app
        .request(
            "GET",
            &format!("/api/articles/{id}/history"),
            None,
            Some(&author.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unparseable_date_filter_is_a_validation_error() {
    let app = helpers::TestApp::new();
    let admin = app.admin();

    let response = app
        .request(
            "GET",
            "/api/admin/audit?from=not-a-date",
            None,
            Some(&admin.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}
