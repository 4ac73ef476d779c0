use crate::common::{load_test_config, output_dir, read_report};
use org_audit::audit::run_project_audit;
use org_audit::AuditError;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ALPHA_INDEX: &str = "---
title: Alpha Project
level: 3.5
type: tool
---
Source at https://github.com/owasp/alpha-code/tree/main) and https://example.com/docs,
Site: https://owasp.org/www-project-alpha
";

const ALPHA_TAB: &str = "---
title: Resources
layout: null
tab: true
---
More at https://blog.example.net/post and https://example.com/docs
";

async fn mount_repo_listing(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/orgs/owasp/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "www-project-alpha", "has_pages": true, "updated_at": "2024-01-09T08:30:00Z"},
            {"name": "www-project-beta", "has_pages": true, "updated_at": "2024-01-10T00:00:00Z"},
            {"name": "www-project-draft", "has_pages": false},
            {"name": "www-chapter-london", "has_pages": true}
        ])))
        .mount(server)
        .await;
}

async fn mount_get(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

async fn mount_alpha_documents(server: &MockServer) {
    let base = "/repos/owasp/www-project-alpha/contents";
    mount_get(
        server,
        &format!("{}/index.md", base),
        ResponseTemplate::new(200).set_body_string(ALPHA_INDEX),
    )
    .await;
    mount_get(
        server,
        &format!("{}/tab_resources.md", base),
        ResponseTemplate::new(200)
            .set_body_string(ALPHA_TAB),
    )
    .await;
    mount_get(
        server,
        &format!("{}/", base),
        ResponseTemplate::new(200).set_body_json(json!([
            {"name": "index.md", "path": "index.md", "type": "file"},
            {"name": "tab_resources.md", "path": "tab_resources.md", "type": "file"},
            {"name": "tab_assets", "path": "tab_assets", "type": "dir"}
        ])),
    )
    .await;
}

#[tokio::test]
async fn test_project_audit_end_to_end() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = load_test_config(&dir, &mock_server.uri());

    mount_repo_listing(&mock_server).await;
    mount_alpha_documents(&mock_server).await;

    // Statistics are still being computed on the first request
    Mock::given(method("GET"))
        .and(path("/repos/owasp/alpha-code/stats/commit_activity"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({})))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/owasp/alpha-code/stats/commit_activity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"days": [0, 1, 0, 2, 0, 0, 0], "total": 3, "week": 1704585600},
            {"days": [1, 0, 0, 0, 0, 0, 4], "total": 5, "week": 1705190400}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    mount_get(
        &mock_server,
        "/repos/owasp/alpha-code",
        ResponseTemplate::new(200)
            .set_body_json(json!({"name": "alpha-code", "open_issues_count": 5})),
    )
    .await;

    // www-project-beta has no index.md and is left out
    let report = run_project_audit(&config).await.expect("Audit failed");

    assert_eq!(report.parent(), Some(output_dir(&dir).as_path()));
    let file_name = report.file_name().unwrap().to_string_lossy().to_string();
    assert!(file_name.starts_with("projects_"));
    assert!(file_name.ends_with(".csv"));

    let (header, rows) = read_report(&report);
    assert_eq!(header[0], "Name");
    assert_eq!(header[9], "External Links");
    assert_eq!(rows.len(), 1);

    let row = &rows[0];
    assert_eq!(row[0], "alpha project");
    assert_eq!(row[1], "Production");
    assert_eq!(row[2], "tool");
    assert_eq!(row[3], "www-project-alpha");
    assert_eq!(row[4], "https://owasp.org/www-project-alpha");
    assert_eq!(row[5], "2024-01-09 08:30:00 UTC");
    assert_eq!(row[6], "https://github.com/owasp/alpha-code");
    assert_eq!(row[7], "week of 2024-01-14: 5 commits [1 0 0 0 0 0 4]");
    assert_eq!(row[8], "5");
    assert_eq!(row[9], "https://example.com/docs\nhttps://blog.example.net/post");
}

#[tokio::test]
async fn test_failed_enrichment_keeps_project() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = load_test_config(&dir, &mock_server.uri());

    mount_repo_listing(&mock_server).await;
    mount_alpha_documents(&mock_server).await;

    mount_get(
        &mock_server,
        "/repos/owasp/alpha-code/stats/commit_activity",
        ResponseTemplate::new(500),
    )
    .await;
    mount_get(
        &mock_server,
        "/repos/owasp/alpha-code",
        ResponseTemplate::new(403),
    )
    .await;

    let report = run_project_audit(&config).await.expect("Audit failed");
    let (_, rows) = read_report(&report);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][7], "");
    assert_eq!(rows[0][8], "0");
}

#[tokio::test]
async fn test_root_listing_failure_aborts() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = load_test_config(&dir, &mock_server.uri());

    mount_repo_listing(&mock_server).await;
    mount_get(
        &mock_server,
        "/repos/owasp/www-project-alpha/contents/index.md",
        ResponseTemplate::new(200).set_body_string(ALPHA_INDEX),
    )
    .await;
    mount_get(
        &mock_server,
        "/repos/owasp/www-project-alpha/contents/",
        ResponseTemplate::new(500),
    )
    .await;

    let result = run_project_audit(&config).await;

    match result {
        Err(AuditError::DocumentListing { repo, .. }) => assert_eq!(repo, "www-project-alpha"),
        other => panic!("Expected a document listing error, got {:?}", other),
    }
    assert!(!output_dir(&dir).exists());
}

#[tokio::test]
async fn test_repository_listing_failure_aborts() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = load_test_config(&dir, &mock_server.uri());

    mount_get(&mock_server, "/orgs/owasp/repos", ResponseTemplate::new(401)).await;

    let result = run_project_audit(&config).await;
    assert!(matches!(result, Err(AuditError::Api(_))));
}
