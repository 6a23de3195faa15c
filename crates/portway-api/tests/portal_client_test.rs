#![allow(clippy::unwrap_used)]
// Integration tests for `PortalClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use portway_api::models::{AddClientRequest, ReportRequest, UpdateClientRequest};
use portway_api::{Error, PortalClient};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, PortalClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = PortalClient::with_client(reqwest::Client::new(), base_url);
    client.set_token("test-token".to_string().into());
    (server, client)
}

// ── Authentication tests ────────────────────────────────────────────

#[tokio::test]
async fn login_stores_token() {
    let server = MockServer::start().await;
    let client =
        PortalClient::with_client(reqwest::Client::new(), Url::parse(&server.uri()).unwrap());

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "roll_no": "ADMIN", "password": "hunter2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "abc123" })))
        .mount(&server)
        .await;

    assert!(!client.has_token());
    let secret: secrecy::SecretString = "hunter2".to_string().into();
    client.login("ADMIN", &secret).await.unwrap();
    assert!(client.has_token());
}

#[tokio::test]
async fn login_failure_maps_to_authentication_error() {
    let server = MockServer::start().await;
    let client =
        PortalClient::with_client(reqwest::Client::new(), Url::parse(&server.uri()).unwrap());

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "bad credentials" })),
        )
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "wrong".to_string().into();
    let result = client.login("ADMIN", &secret).await;

    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
}

#[tokio::test]
async fn missing_token_is_refused_before_any_request() {
    let server = MockServer::start().await;
    let client =
        PortalClient::with_client(reqwest::Client::new(), Url::parse(&server.uri()).unwrap());

    // No mock mounted: if the request went out, the test would see a
    // transport-level error instead of MissingToken.
    let result = client.list_clients().await;
    assert!(matches!(result, Err(Error::MissingToken)));
}

// ── Client tests ────────────────────────────────────────────────────

#[tokio::test]
async fn list_clients_sends_bearer_token() {
    let (server, client) = setup().await;

    let payload = json!({
        "clients": [
            { "_id": "c1", "roll_no": "23203A0024", "ip": "192.168.1.10",
              "data": 4.2, "activity": "Studying", "blocked": false },
            { "id": 2, "name": "Smart TV", "ip_address": "192.168.1.12",
              "data_usage": "15.8", "blocked": true }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/api/admin/clients"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&payload))
        .mount(&server)
        .await;

    let clients = client.list_clients().await.unwrap();

    assert_eq!(clients.len(), 2);
    assert_eq!(
        clients[0].get("roll_no").and_then(|v| v.as_str()),
        Some("23203A0024")
    );
    assert_eq!(clients[1].get("name").and_then(|v| v.as_str()), Some("Smart TV"));
}

#[tokio::test]
async fn add_client_conflict_maps_to_conflict_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/admin/clients"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({ "message": "User already exists" })),
        )
        .mount(&server)
        .await;

    let req = AddClientRequest {
        roll_no: "23203A0024".into(),
        password: None,
        activity: None,
    };
    let result = client.add_client(&req).await;

    match result {
        Err(Error::Conflict { message }) => assert_eq!(message, "User already exists"),
        other => panic!("expected Conflict, got: {other:?}"),
    }
}

#[tokio::test]
async fn update_client_sends_partial_body() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/api/admin/clients/c1"))
        .and(body_json(json!({ "blocked": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(&server)
        .await;

    let req = UpdateClientRequest {
        blocked: Some(true),
        ..UpdateClientRequest::default()
    };
    client.update_client("c1", &req).await.unwrap();
}

#[tokio::test]
async fn update_client_bandwidth_limit_passes_numbers_through() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/api/admin/clients/c1"))
        .and(body_json(json!({ "bandwidth_limit": 75 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(&server)
        .await;

    let req = UpdateClientRequest {
        bandwidth_limit: Some(json!(75)),
        ..UpdateClientRequest::default()
    };
    client.update_client("c1", &req).await.unwrap();
}

// ── Filtering tests ─────────────────────────────────────────────────

#[tokio::test]
async fn filtering_parses_manual_blocks_and_categories() {
    let (server, client) = setup().await;

    let payload = json!({
        "manual_blocks": ["proxy.net"],
        "categories": {
            "Gaming": { "active": true, "sites": ["steampowered.com", "twitch.tv"] },
            "Streaming": { "active": false, "sites": ["netflix.com"] }
        }
    });

    Mock::given(method("GET"))
        .and(path("/api/admin/filtering"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&payload))
        .mount(&server)
        .await;

    let filtering = client.filtering().await.unwrap();

    assert_eq!(filtering.manual_blocks, vec!["proxy.net"]);
    assert!(filtering.categories["Gaming"].active);
    assert!(!filtering.categories["Streaming"].active);
    assert_eq!(filtering.categories["Gaming"].sites.len(), 2);
}

#[tokio::test]
async fn duplicate_manual_block_is_a_conflict() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/admin/filtering/sites"))
        .and(body_json(json!({ "url": "proxy.net" })))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({ "message": "already blocked" })),
        )
        .mount(&server)
        .await;

    let result = client.block_site("proxy.net").await;
    assert!(matches!(result, Err(Error::Conflict { .. })));
}

#[tokio::test]
async fn toggle_category_returns_new_state() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/admin/filtering/categories"))
        .and(body_json(json!({ "category": "Gaming" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "active": false })))
        .mount(&server)
        .await;

    let resp = client.toggle_category("Gaming").await.unwrap();
    assert!(!resp.active);
}

// ── Report tests ────────────────────────────────────────────────────

#[tokio::test]
async fn generate_report_round_trips_payload() {
    let (server, client) = setup().await;

    let payload = json!({
        "title": "Weekly Top Bandwidth Users",
        "headers": ["Rank", "Student ID", "Data Used (GB)"],
        "data": [["#1", "23203A0026", 15.8], ["#2", "23203A0024", 4.2]]
    });

    Mock::given(method("POST"))
        .and(path("/api/admin/reports"))
        .and(body_json(json!({ "type": "Top Bandwidth Users", "range": "weekly" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&payload))
        .mount(&server)
        .await;

    let report = client
        .generate_report(&ReportRequest {
            report_type: "Top Bandwidth Users".into(),
            range: "weekly".into(),
        })
        .await
        .unwrap();

    assert_eq!(report.title.as_deref(), Some("Weekly Top Bandwidth Users"));
    assert_eq!(report.headers.len(), 3);
    assert_eq!(report.data.len(), 2);
}

// ── Error shape tests ───────────────────────────────────────────────

#[tokio::test]
async fn garbage_body_maps_to_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway error</html>"))
        .mount(&server)
        .await;

    let result = client.stats().await;
    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
}

#[tokio::test]
async fn expired_session_maps_to_authentication_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/logs"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "expired" })))
        .mount(&server)
        .await;

    let result = client.list_logs().await;
    assert!(result.as_ref().err().map(Error::is_auth).unwrap_or(false));
}
