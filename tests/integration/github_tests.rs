use org_audit::config::GitHubConfig;
use org_audit::github::GitHubClient;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn github_config(api_base: &str) -> GitHubConfig {
    GitHubConfig {
        api_base: api_base.to_string(),
        token: "gh_test".to_string(),
        organization: "owasp".to_string(),
        repo_prefix: "www-project-".to_string(),
        per_page: 2,
        commit_activity_retry_secs: 0,
    }
}

#[tokio::test]
async fn test_repository_listing_follows_next_links() {
    let mock_server = MockServer::start().await;
    let next = format!(
        "<{}/orgs/owasp/repos?page=2>; rel=\"next\"",
        mock_server.uri()
    );

    Mock::given(method("GET"))
        .and(path("/orgs/owasp/repos"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "2"))
        .and(query_param("type", "public"))
        .and(header("authorization", "Bearer gh_test"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("link", next.as_str())
                .set_body_json(json!([
                    {"name": "www-project-alpha", "has_pages": true},
                    {"name": "www-project-hidden", "has_pages": false}
                ])),
        )
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/orgs/owasp/repos"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "www-chapter-london", "has_pages": true},
            {"name": "www-project-beta", "has_pages": true}
        ])))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = GitHubClient::new(reqwest::Client::new(), &github_config(&mock_server.uri()));

    let all = client.list_org_repos().await.expect("Listing failed");
    assert_eq!(all.len(), 4);

    let matching = client
        .matching_repos("www-project-")
        .await
        .expect("Listing failed");
    let names: Vec<&str> = matching.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["www-project-alpha", "www-project-beta"]);
}

#[tokio::test]
async fn test_download_contents_uses_raw_media_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/owasp/www-project-alpha/contents/index.md"))
        .and(header("accept", "application/vnd.github.raw"))
        .respond_with(ResponseTemplate::new(200).set_body_string("title: Alpha\n"))
        .mount(&mock_server)
        .await;

    let client = GitHubClient::new(reqwest::Client::new(), &github_config(&mock_server.uri()));

    let body = client
        .download_contents("www-project-alpha", "index.md")
        .await
        .expect("Download failed");
    assert_eq!(body, "title: Alpha\n");

    let missing = client
        .download_contents("www-project-alpha", "info.md")
        .await
        .unwrap_err();
    assert!(missing.is_not_found());
}
