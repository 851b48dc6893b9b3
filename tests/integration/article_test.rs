//! Integration tests for the article approval workflow.

mod helpers;

use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_create_starts_as_draft_with_slug_and_excerpt() {
    let app = helpers::TestApp::new();
    let author = app.author("bu_rina");

    let article = app.create_article(&author, "Jadwal Ujian Semester").await;

    assert_eq!(article["status"], "draft");
    assert_eq!(article["version"], 1);
    assert_eq!(article["authorId"], author.id.to_string());
    assert!(
        article["slug"]
            .as_str()
            .unwrap()
            .starts_with("jadwal-ujian-semester-")
    );
    assert_eq!(
        article["excerpt"],
        "Pengumuman untuk seluruh siswa dan orang tua...."
    );
    assert!(article["publishedAt"].is_null());
}

#[tokio::test]
async fn test_full_publication_lifecycle() {
    let app = helpers::TestApp::new();
    let author = app.author("pak_budi");
    let admin = app.admin();

    let published = app
        .publish_article(&author, &admin, "Libur Nasional")
        .await;
    assert_eq!(published["status"], "published");
    assert_eq!(published["approvedBy"], admin.id.to_string());
    assert!(published["publishedAt"].is_string());
    assert_eq!(published["version"], 3);

    let slug = published["slug"].as_str().unwrap();
    let public = app
        .request("GET", &format!("/api/public/articles/{slug}"), None, None)
        .await;
    assert_eq!(public.status, StatusCode::OK);
    assert_eq!(public.body["data"]["id"], published["id"]);

    let listing = app.request("GET", "/api/public/articles", None, None).await;
    assert_eq!(listing.body["data"]["total"], 1);

    let id = published["id"].as_str().unwrap();
    let unpublished = app
        .request(
            "POST",
            &format!("/api/articles/{id}/unpublish"),
            None,
            Some(&admin.token),
        )
        .await;
    assert_eq!(unpublished.status, StatusCode::OK);
    assert_eq!(unpublished.body["data"]["status"], "draft");
    assert!(unpublished.body["data"]["publishedAt"].is_null());

    let gone = app
        .request("GET", &format!("/api/public/articles/{slug}"), None, None)
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert_eq!(gone.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_author_cannot_approve() {
    let app = helpers::TestApp::new();
    let author = app.author("bu_sari");
    let article = app.create_article(&author, "Lomba Kebersihan").await;
    let id = article["id"].as_str().unwrap();

    app.request(
        "POST",
        &format!("/api/articles/{id}/submit"),
        None,
        Some(&author.token),
    )
    .await;
    let response = app
        .request(
            "POST",
            &format!("/api/articles/{id}/approve"),
            None,
            Some(&author.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "FORBIDDEN");
}

#[tokio::test]
async fn test_approving_a_draft_is_an_invalid_transition() {
    let app = helpers::TestApp::new();
    let author = app.author("bu_sari");
    let admin = app.admin();
    let article = app.create_article(&author, "Rapat Komite").await;
    let id = article["id"].as_str().unwrap();

    let response = app
        .request(
            "POST",
            &format!("/api/articles/{id}/approve"),
            None,
            Some(&admin.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "INVALID_TRANSITION");
}

#[tokio::test]
async fn test_rejected_article_goes_back_to_draft_on_edit() {
    let app = helpers::TestApp::new();
    let author = app.author("pak_joko");
    let admin = app.admin();
    let article = app.create_article(&author, "Kegiatan Pramuka").await;
    let id = article["id"].as_str().unwrap();

    app.request(
        "POST",
        &format!("/api/articles/{id}/submit"),
        None,
        Some(&author.token),
    )
    .await;
    let rejected = app
        .request(
            "POST",
            &format!("/api/articles/{id}/reject"),
            Some(json!({ "reason": "  Tambahkan tanggal kegiatan  " })),
            Some(&admin.token),
        )
        .await;
    assert_eq!(rejected.status, StatusCode::OK);
    assert_eq!(rejected.body["data"]["status"], "rejected");
    assert_eq!(
        rejected.body["data"]["rejectionReason"],
        "Tambahkan tanggal kegiatan"
    );

    let edited = app
        .request(
            "PUT",
            &format!("/api/articles/{id}"),
            Some(json!({ "content": "<p>Sabtu, 12 Oktober di lapangan.</p>" })),
            Some(&author.token),
        )
        .await;
    assert_eq!(edited.status, StatusCode::OK);
    assert_eq!(edited.body["data"]["status"], "draft");

    let resubmitted = app
        .request(
            "POST",
            &format!("/api/articles/{id}/submit"),
            None,
            Some(&author.token),
        )
        .await;
    assert_eq!(resubmitted.body["data"]["status"], "pending");
}

#[tokio::test]
async fn test_author_cannot_edit_pending_article() {
    let app = helpers::TestApp::new();
    let author = app.author("pak_joko");
    let article = app.create_article(&author, "Study Tour").await;
    let id = article["id"].as_str().unwrap();
    app.request(
        "POST",
        &format!("/api/articles/{id}/submit"),
        None,
        Some(&author.token),
    )
    .await;

    let response = app
        .request(
            "PUT",
            &format!("/api/articles/{id}"),
            Some(json!({ "title": "Study Tour Bali" })),
            Some(&author.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_blank_title_is_a_validation_error() {
    let app = helpers::TestApp::new();
    let author = app.author("bu_rina");

    let response = app
        .request(
            "POST",
            "/api/articles",
            Some(json!({ "title": "   ", "content": "<p>Isi</p>" })),
            Some(&author.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert!(response.body["details"]["title"].is_array());
}

#[tokio::test]
async fn test_malformed_body_is_a_validation_error() {
    let app = helpers::TestApp::new();
    let author = app.author("bu_rina");

    let response = app
        .request(
            "POST",
            "/api/articles",
            Some(json!({ "title": 42 })),
            Some(&author.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_empty_update_is_rejected() {
    let app = helpers::TestApp::new();
    let author = app.author("bu_rina");
    let article = app.create_article(&author, "Kantin Sehat").await;
    let id = article["id"].as_str().unwrap();

    let response = app
        .request(
            "PUT",
            &format!("/api/articles/{id}"),
            Some(json!({})),
            Some(&author.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_stale_version_is_a_conflict() {
    let app = helpers::TestApp::new();
    let author = app.author("bu_rina");
    let article = app.create_article(&author, "Perpustakaan Baru").await;
    let id = article["id"].as_str().unwrap();

    let first = app
        .request(
            "PUT",
            &format!("/api/articles/{id}"),
            Some(json!({ "title": "Perpustakaan Digital", "expectedVersion": 1 })),
            Some(&author.token),
        )
        .await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["data"]["version"], 2);

    let stale = app
        .request(
            "PUT",
            &format!("/api/articles/{id}"),
            Some(json!({ "title": "Perpustakaan Lama", "expectedVersion": 1 })),
            Some(&author.token),
        )
        .await;
    assert_eq!(stale.status, StatusCode::CONFLICT);
    assert_eq!(stale.body["error"], "CONFLICT");
    assert_eq!(stale.body["details"]["currentVersion"], 2);

    let stale_submit = app
        .request(
            "POST",
            &format!("/api/articles/{id}/submit?expected_version=1"),
            None,
            Some(&author.token),
        )
        .await;
    assert_eq!(stale_submit.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_other_authors_drafts_are_invisible() {
    let app = helpers::TestApp::new();
    let owner = app.author("bu_rina");
    let other = app.author("pak_budi");
    let admin = app.admin();
    let article = app.create_article(&owner, "Draf Rahasia").await;
    let id = article["id"].as_str().unwrap();

    let hidden = app
        .request("GET", &format!("/api/articles/{id}"), None, Some(&other.token))
        .await;
    assert_eq!(hidden.status, StatusCode::NOT_FOUND);

    let listing = app
        .request("GET", "/api/articles", None, Some(&other.token))
        .await;
    assert_eq!(listing.body["data"]["total"], 0);

    let admin_listing = app
        .request("GET", "/api/articles?status=draft", None, Some(&admin.token))
        .await;
    assert_eq!(admin_listing.body["data"]["total"], 1);
}

#[tokio::test]
async fn test_list_filters_and_paginates() {
    let app = helpers::TestApp::new();
    let author = app.author("bu_rina");
    for title in ["Upacara Bendera", "Upacara Hari Guru", "Pentas Seni"] {
        app.create_article(&author, title).await;
    }

    let search = app
        .request(
            "GET",
            "/api/articles?search=upacara&page=1&per_page=1",
            None,
            Some(&author.token),
        )
        .await;
    assert_eq!(search.status, StatusCode::OK);
    assert_eq!(search.body["data"]["total"], 2);
    assert_eq!(search.body["data"]["total_pages"], 2);
    assert_eq!(search.body["data"]["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_rules() {
    let app = helpers::TestApp::new();
    let author = app.author("bu_rina");
    let admin = app.admin();

    let draft = app.create_article(&author, "Salah Ketik").await;
    let draft_id = draft["id"].as_str().unwrap();
    let deleted = app
        .request(
            "DELETE",
            &format!("/api/articles/{draft_id}"),
            None,
            Some(&author.token),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["data"]["deleted"], true);

    let published = app.publish_article(&author, &admin, "Hasil Lomba").await;
    let published_id = published["id"].as_str().unwrap();
    let forbidden = app
        .request(
            "DELETE",
            &format!("/api/articles/{published_id}"),
            None,
            Some(&author.token),
        )
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

    let by_admin = app
        .request(
            "DELETE",
            &format!("/api/articles/{published_id}"),
            None,
            Some(&admin.token),
        )
        .await;
    assert_eq!(by_admin.status, StatusCode::OK);

    let missing = app
        .request(
            "GET",
            &format!("/api/articles/{published_id}"),
            None,
            Some(&admin.token),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_id_is_a_validation_error() {
    let app = helpers::TestApp::new();
    let author = app.author("bu_rina");

    let response = app
        .request("GET", "/api/articles/not-a-uuid", None, Some(&author.token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_status_filter_is_a_validation_error() {
    let app = helpers::TestApp::new();
    let author = app.author("bu_rina");

    let response = app
        .request(
            "GET",
            "/api/articles?status=archived",
            None,
            Some(&author.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert!(response.body["details"]["query"].is_array());
}

#[tokio::test]
async fn test_public_url_survives_unpublish_and_rename() {
    let app = helpers::TestApp::new();
    let author = app.author("pak_budi");
    let admin = app.admin();

    let published = app.publish_article(&author, &admin, "Pentas Seni").await;
    let id = published["id"].as_str().unwrap();
    let slug = published["slug"].as_str().unwrap();

    let unpublished = app
        .request(
            "POST",
            &format!("/api/articles/{id}/unpublish"),
            None,
            Some(&admin.token),
        )
        .await;
    assert_eq!(unpublished.status, StatusCode::OK);

    let renamed = app
        .request(
            "PUT",
            &format!("/api/articles/{id}"),
            Some(json!({ "title": "Pentas Seni Akhir Tahun" })),
            Some(&author.token),
        )
        .await;
    assert_eq!(renamed.status, StatusCode::OK, "{:?}", renamed.body);
    assert_eq!(renamed.body["data"]["title"], "Pentas Seni Akhir Tahun");
    assert_eq!(renamed.body["data"]["slug"], slug);
    assert!(renamed.body["data"]["firstPublishedAt"].is_string());
}
