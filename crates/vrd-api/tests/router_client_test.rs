#![allow(clippy::unwrap_used)]
// Integration tests for `RouterClient` using wiremock.

use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vrd_api::{Error, RouterClient, SessionState, TransportConfig, hash_password};

const PASSWORD: &str = "hunter2";
const SALT: &str = "abcd";

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, RouterClient) {
    setup_with(TransportConfig::default()).await
}

async fn setup_with(transport: TransportConfig) -> (MockServer, RouterClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client =
        RouterClient::new(base_url, SecretString::from(PASSWORD.to_string()), &transport).unwrap();
    (server, client)
}

async fn mount_metadata(server: &MockServer, status: u16, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_login_with_cookie(server: &MockServer, cookie: &str) {
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({ "password": hash_password(PASSWORD, SALT) })))
        .respond_with(ResponseTemplate::new(200).insert_header("Set-Cookie", cookie))
        .expect(1)
        .mount(server)
        .await;
}

// ── Handshake ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_posts_salted_hash() {
    let (server, mut client) = setup().await;

    // The router answers the metadata probe with 401 but still sends the salt.
    mount_metadata(&server, 401, json!({ "passwordSalt": SALT, "requirePassword": true })).await;
    mount_login_with_cookie(&server, "XSRF-TOKEN=tok123; Path=/").await;

    let creds = client.login().await.unwrap();

    assert_eq!(client.state(), SessionState::Authenticated);
    assert_eq!(client.metadata().unwrap().password_salt, SALT);
    assert_eq!(creds.xsrf_token().unwrap().expose(), "tok123");
}

#[tokio::test]
async fn test_missing_salt_fails_before_login() {
    let (server, mut client) = setup().await;

    mount_metadata(&server, 200, json!({ "requirePassword": true })).await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = client.login().await;

    match result {
        Err(Error::MissingPasswordSalt { ref body }) => {
            assert!(body.contains("requirePassword"), "body not carried: {body}");
        }
        other => panic!("expected MissingPasswordSalt, got: {other:?}"),
    }
    assert_eq!(client.state(), SessionState::Failed);
}

#[tokio::test]
async fn test_empty_salt_is_rejected() {
    let (server, mut client) = setup().await;

    mount_metadata(&server, 200, json!({ "passwordSalt": "" })).await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = client.login().await;
    assert!(
        matches!(result, Err(Error::MissingPasswordSalt { .. })),
        "expected MissingPasswordSalt, got: {result:?}"
    );
}

#[tokio::test]
async fn test_null_salt_is_missing_salt() {
    let (server, mut client) = setup().await;

    mount_metadata(&server, 401, json!({ "passwordSalt": null })).await;

    let result = client.login().await;
    assert!(
        matches!(result, Err(Error::MissingPasswordSalt { .. })),
        "expected MissingPasswordSalt, got: {result:?}"
    );
}

#[tokio::test]
async fn test_malformed_metadata_carries_body() {
    let (server, mut client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = client.login().await;

    match result {
        Err(Error::Deserialization { ref body, endpoint, .. }) => {
            assert_eq!(endpoint, "api");
            assert_eq!(body, "<html>oops</html>");
        }
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_login_rejected() {
    let (server, mut client) = setup().await;

    mount_metadata(&server, 401, json!({ "passwordSalt": SALT })).await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("denied"))
        .mount(&server)
        .await;

    let result = client.login().await;

    match result {
        Err(Error::LoginFailed { status, ref body }) => {
            assert_eq!(status, 401);
            assert_eq!(body, "denied");
        }
        other => panic!("expected LoginFailed, got: {other:?}"),
    }
    assert_eq!(client.state(), SessionState::Failed);
}

#[tokio::test]
async fn test_login_requires_exactly_200() {
    let (server, mut client) = setup().await;

    mount_metadata(&server, 200, json!({ "passwordSalt": SALT })).await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let result = client.login().await;
    assert!(
        matches!(result, Err(Error::LoginFailed { status: 204, .. })),
        "expected LoginFailed(204), got: {result:?}"
    );
}

// ── Network listing ─────────────────────────────────────────────────

#[tokio::test]
async fn test_networks_replays_xsrf_token() {
    let (server, mut client) = setup().await;

    mount_metadata(&server, 401, json!({ "passwordSalt": SALT })).await;
    mount_login_with_cookie(&server, "XSRF-TOKEN=tok123; Path=/").await;
    Mock::given(method("GET"))
        .and(path("/api/network"))
        .and(header("X-XSRF-TOKEN", "tok123"))
        .and(header_exists("cookie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "connectionId": 1,
                "connectionType": "dhcp",
                "name": "Broadband Connection (Ethernet/Coax)",
                "ipAddress": "203.0.113.7",
                "ipv6Address": "",
                "type": 2
            },
            { "name": "Network (Home/Office)", "ipAddress": "192.168.1.1" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let creds = client.login().await.unwrap();
    let networks = client.networks(&creds).await.unwrap();

    assert_eq!(networks.len(), 2);
    assert_eq!(networks[0].name, "Broadband Connection (Ethernet/Coax)");
    assert_eq!(networks[0].ip_address, "203.0.113.7");
    assert_eq!(networks[0].network_type, 2);
    assert_eq!(networks[1].connection_type, "");
}

#[tokio::test]
async fn test_networks_tolerates_sparse_entries() {
    let (server, mut client) = setup().await;

    mount_metadata(&server, 401, json!({ "passwordSalt": SALT })).await;
    mount_login_with_cookie(&server, "XSRF-TOKEN=tok123; Path=/").await;
    Mock::given(method("GET"))
        .and(path("/api/network"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "connectionId": 5 },
            { "name": "Network (Home/Office)", "ipAddress": "192.168.1.1", "ipv6Address": null },
            { "name": "Broadband Connection (Ethernet/Coax)", "ipAddress": "203.0.113.7" }
        ])))
        .mount(&server)
        .await;

    let creds = client.login().await.unwrap();
    let networks = client.networks(&creds).await.unwrap();

    assert_eq!(networks.len(), 3);
    assert_eq!(networks[0].name, "");
    assert_eq!(networks[1].ipv6_address, "");
    assert_eq!(networks[2].ip_address, "203.0.113.7");
}

#[tokio::test]
async fn test_networks_without_xsrf_cookie_is_not_attempted() {
    let (server, mut client) = setup().await;

    mount_metadata(&server, 401, json!({ "passwordSalt": SALT })).await;
    mount_login_with_cookie(&server, "Session=abc; Path=/").await;
    Mock::given(method("GET"))
        .and(path("/api/network"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let creds = client.login().await.unwrap();
    let result = client.networks(&creds).await;

    assert!(
        matches!(result, Err(Error::MissingXsrfToken)),
        "expected MissingXsrfToken, got: {result:?}"
    );
}

#[tokio::test]
async fn test_networks_non_200_carries_status() {
    let (server, mut client) = setup().await;

    mount_metadata(&server, 401, json!({ "passwordSalt": SALT })).await;
    mount_login_with_cookie(&server, "XSRF-TOKEN=tok123; Path=/").await;
    Mock::given(method("GET"))
        .and(path("/api/network"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "error": 7 })))
        .mount(&server)
        .await;

    let creds = client.login().await.unwrap();
    let result = client.networks(&creds).await;

    match result {
        Err(Error::UnexpectedStatus {
            endpoint,
            status,
            ref body,
        }) => {
            assert_eq!(endpoint, "network");
            assert_eq!(status, 403);
            assert!(body.contains("error"));
        }
        other => panic!("expected UnexpectedStatus, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_networks_malformed_body() {
    let (server, mut client) = setup().await;

    mount_metadata(&server, 401, json!({ "passwordSalt": SALT })).await;
    mount_login_with_cookie(&server, "XSRF-TOKEN=tok123; Path=/").await;
    Mock::given(method("GET"))
        .and(path("/api/network"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "not": "a list" })))
        .mount(&server)
        .await;

    let creds = client.login().await.unwrap();
    let result = client.networks(&creds).await;
    assert!(
        matches!(result, Err(Error::Deserialization { endpoint: "network", .. })),
        "expected Deserialization error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_http_tracing_does_not_change_exchange() {
    let transport = TransportConfig {
        trace_http: true,
        ..TransportConfig::default()
    };
    let (server, mut client) = setup_with(transport).await;

    mount_metadata(&server, 401, json!({ "passwordSalt": SALT })).await;
    mount_login_with_cookie(&server, "XSRF-TOKEN=tok123; Path=/").await;
    Mock::given(method("GET"))
        .and(path("/api/network"))
        .and(header("X-XSRF-TOKEN", "tok123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let creds = client.login().await.unwrap();
    assert!(client.networks(&creds).await.unwrap().is_empty());
    client.close();
}

#[tokio::test]
async fn test_unreachable_router_is_transport_error() {
    let client_url = Url::parse("http://127.0.0.1:9").unwrap();
    let mut client = RouterClient::new(
        client_url,
        SecretString::from(PASSWORD.to_string()),
        &TransportConfig::default(),
    )
    .unwrap();

    let result = client.login().await;
    assert!(
        matches!(result, Err(Error::Transport(_))),
        "expected Transport error, got: {result:?}"
    );
    assert_eq!(client.state(), SessionState::Failed);
}
