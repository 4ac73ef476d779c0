use crate::common::{load_test_config, read_report};
use org_audit::audit::{run_member_export, MemberExport};
use org_audit::config::CopperConfig;
use org_audit::copper::{CopperClient, PersonField};
use org_audit::{AuditError, ConfigError};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_customer_search(server: &MockServer) {
    // Second page first so the unqualified first-page mock does not shadow it
    Mock::given(method("GET"))
        .and(path("/v1/customers/search"))
        .and(query_param("page", "tok2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "search_result",
            "data": [
                {
                    "id": "cus_grace",
                    "name": "Grace Brewster Hopper",
                    "email": "grace@example.com",
                    "metadata": {"membership_type": "One Year", "membership_end": "12/31/2099"}
                },
                {
                    "id": "cus_student",
                    "name": "Sam Student",
                    "email": "sam@example.com",
                    "metadata": {"membership_type": "student", "membership_end": "2099-01-01"}
                }
            ],
            "has_more": false,
            "next_page": null
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/customers/search"))
        .and(query_param("limit", "100"))
        .and(header("authorization", "Bearer sk_test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "search_result",
            "data": [
                {
                    "id": "cus_ada",
                    "name": "Ada Lovelace",
                    "email": "Ada@Example.com",
                    "metadata": {
                        "membership_type": "lifetime",
                        "membership_start": "2020-01-01",
                        "membership_recurring": "no"
                    }
                },
                {
                    "id": "cus_old",
                    "name": "Old Member",
                    "email": "old@example.com",
                    "metadata": {"membership_type": "two", "membership_end": "2020-01-01"}
                }
            ],
            "has_more": true,
            "next_page": "tok2"
        })))
        .up_to_n_times(1)
        .expect(1)
        .mount(server)
        .await;
}

fn ada_person() -> serde_json::Value {
    json!({
        "id": 7,
        "first_name": "Ada",
        "last_name": "Lovelace",
        "address": {"street": "12 St James's Sq", "city": "London", "state": null, "postal_code": "SW1Y", "country": "UK"},
        "emails": [
            {"email": "ada@example.com", "category": "personal"},
            {"email": "ada.lovelace@owasp.org", "category": "work"}
        ],
        "phone_numbers": [{"number": "+44 20 0000", "category": "mobile"}],
        "tags": ["leader", "lifetime"],
        "custom_fields": [
            {"custom_field_definition_id": 395220, "value": "ada-l"},
            {"custom_field_definition_id": 394882, "value": 674398}
        ]
    })
}

async fn mount_copper(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/people/fetch_by_email"))
        .and(header("x-pw-accesstoken", "cu_test"))
        .and(header("x-pw-useremail", "admin@example.com"))
        .and(header("x-pw-application", "developer_api"))
        .and(body_json(json!({"email": "ada@example.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(ada_person()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_member_export_end_to_end() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = load_test_config(&dir, &mock_server.uri());

    mount_customer_search(&mock_server).await;
    mount_copper(&mock_server).await;

    let report = run_member_export(&config).await.expect("Export failed");

    let file_name = report.file_name().unwrap().to_string_lossy().to_string();
    assert!(file_name.starts_with("members_"));

    let (header, rows) = read_report(&report);
    assert_eq!(header.len(), 15);
    assert_eq!(header[0], "first_name");
    assert_eq!(header[14], "tags");
    assert_eq!(rows.len(), 2);

    let ada = &rows[0];
    assert_eq!(ada[0], "Ada");
    assert_eq!(ada[1], "Lovelace");
    assert_eq!(ada[2], "ada.lovelace@owasp.org\nada@example.com");
    assert_eq!(ada[3], "+44 20 0000");
    assert_eq!(ada[4], "12 St James's Sq");
    assert_eq!(ada[5], "London");
    assert_eq!(ada[6], "");
    assert_eq!(ada[9], "lifetime");
    assert_eq!(ada[10], "2020-01-01");
    assert_eq!(ada[12], "no");
    assert_eq!(ada[13], "ada-l");
    assert_eq!(ada[14], "leader\nlifetime");

    // No CRM record: names and email come from the customer
    let grace = &rows[1];
    assert_eq!(grace[0], "Grace");
    assert_eq!(grace[1], "Brewster Hopper");
    assert_eq!(grace[2], "grace@example.com");
    assert_eq!(grace[9], "One Year");
    assert_eq!(grace[11], "12/31/2099");
    assert_eq!(grace[13], "");
}

#[tokio::test]
async fn test_member_tally() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = load_test_config(&dir, &mock_server.uri());

    mount_customer_search(&mock_server).await;
    mount_copper(&mock_server).await;

    let export = MemberExport::new(reqwest::Client::new(), &config).unwrap();
    let (records, tally) = export.run(chrono::Utc::now()).await.expect("Export failed");

    assert_eq!(records.len(), 2);
    assert_eq!(tally.lifetime, 1);
    assert_eq!(tally.one_year, 1);
    assert_eq!(tally.two_year, 0);
    assert_eq!(tally.total(), 2);
}

#[tokio::test]
async fn test_customer_search_failure_aborts() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = load_test_config(&dir, &mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/v1/customers/search"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let result = run_member_export(&config).await;
    assert!(matches!(result, Err(AuditError::Api(_))));
}

#[tokio::test]
async fn test_missing_crm_section() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let mut config = load_test_config(&dir, &mock_server.uri());
    config.copper = None;

    let result = run_member_export(&config).await;
    assert!(matches!(
        result,
        Err(AuditError::Config(ConfigError::MissingSection("copper")))
    ));
}

#[tokio::test]
async fn test_crm_lookup_lowercases_email() {
    let mock_server = MockServer::start().await;
    mount_copper(&mock_server).await;

    let config = CopperConfig {
        api_base: mock_server.uri(),
        api_key: "cu_test".to_string(),
        user_email: "admin@example.com".to_string(),
    };
    let client = CopperClient::new(reqwest::Client::new(), &config);

    let person = client
        .find_person_by_email("  ADA@example.com ")
        .await
        .expect("Lookup failed");
    assert_eq!(person.first_name, "Ada");
    assert_eq!(person.github_username().as_deref(), Some("ada-l"));
    assert!(person.field(PersonField::Membership).is_some());

    let missing = client.find_person_by_email("nobody@example.com").await;
    assert!(missing.unwrap_err().is_not_found());
}
