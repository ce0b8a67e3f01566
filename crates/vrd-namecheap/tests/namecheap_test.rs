#![allow(clippy::unwrap_used)]
// Integration tests for `NamecheapPublisher` against a mocked XML API.

use std::net::Ipv4Addr;

use secrecy::SecretString;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vrd_core::{DnsPublisher, PublishError};
use vrd_namecheap::{NamecheapConfig, NamecheapError, NamecheapPublisher};

const IP: Ipv4Addr = Ipv4Addr::new(203, 0, 113, 7);

const OK_BODY: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<ApiResponse Status="OK" xmlns="http://api.namecheap.com/xml.response">
  <Errors />
  <CommandResponse Type="namecheap.domains.dns.setHosts">
    <DomainDNSSetHostsResult Domain="example.com" IsSuccess="true" />
  </CommandResponse>
</ApiResponse>"#;

const ERROR_BODY: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<ApiResponse Status="ERROR" xmlns="http://api.namecheap.com/xml.response">
  <Errors>
    <Error Number="1011102">Parameter APIKey is invalid</Error>
  </Errors>
</ApiResponse>"#;

async fn setup() -> (MockServer, NamecheapPublisher) {
    let server = MockServer::start().await;
    let mut cfg = NamecheapConfig::new("alice", SecretString::from("key-123".to_string()));
    cfg.endpoint = format!("{}/xml.response", server.uri());
    (server, NamecheapPublisher::new(cfg).unwrap())
}

fn hosts() -> Vec<String> {
    vec!["@".to_string(), "www".to_string()]
}

fn provider_source(err: &PublishError) -> &NamecheapError {
    match err {
        PublishError::Provider { provider, source } => {
            assert_eq!(*provider, "namecheap");
            source.downcast_ref::<NamecheapError>().unwrap()
        }
        other => panic!("expected provider error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_set_hosts_sends_every_record() {
    let (server, publisher) = setup().await;

    Mock::given(method("POST"))
        .and(path("/xml.response"))
        .and(body_string_contains("Command=namecheap.domains.dns.setHosts"))
        .and(body_string_contains("ApiUser=alice"))
        .and(body_string_contains("UserName=alice"))
        .and(body_string_contains("ClientIp=203.0.113.7"))
        .and(body_string_contains("SLD=example"))
        .and(body_string_contains("TLD=com"))
        .and(body_string_contains("HostName1=%40"))
        .and(body_string_contains("HostName2=www"))
        .and(body_string_contains("Address2=203.0.113.7"))
        .and(body_string_contains("RecordType1=A"))
        .respond_with(ResponseTemplate::new(200).set_body_string(OK_BODY))
        .expect(1)
        .mount(&server)
        .await;

    publisher.set_hosts("example.com", &hosts(), IP).await.unwrap();
}

#[tokio::test]
async fn test_api_error_is_surfaced() {
    let (server, publisher) = setup().await;

    Mock::given(method("POST"))
        .and(path("/xml.response"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ERROR_BODY))
        .mount(&server)
        .await;

    let err = publisher
        .set_hosts("example.com", &hosts(), IP)
        .await
        .unwrap_err();

    match provider_source(&err) {
        NamecheapError::Api { errors } => {
            assert_eq!(errors[0].number, "1011102");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
    assert!(err.to_string().contains("Parameter APIKey is invalid"));
}

#[tokio::test]
async fn test_http_failure_carries_status() {
    let (server, publisher) = setup().await;

    Mock::given(method("POST"))
        .and(path("/xml.response"))
        .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
        .mount(&server)
        .await;

    let err = publisher
        .set_hosts("example.com", &hosts(), IP)
        .await
        .unwrap_err();

    assert!(matches!(
        provider_source(&err),
        NamecheapError::UnexpectedStatus { status: 503, .. }
    ));
}

#[tokio::test]
async fn test_invalid_domain_is_not_sent() {
    let (server, publisher) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(OK_BODY))
        .expect(0)
        .mount(&server)
        .await;

    let err = publisher
        .set_hosts("localhost", &hosts(), IP)
        .await
        .unwrap_err();
    assert!(matches!(err, PublishError::InvalidDomain { .. }));
}

#[tokio::test]
async fn test_publish_through_core_reports_domain() {
    let (server, publisher) = setup().await;

    Mock::given(method("POST"))
        .and(path("/xml.response"))
        .respond_with(ResponseTemplate::new(200).set_body_string(OK_BODY))
        .expect(2)
        .mount(&server)
        .await;

    let mut request = vrd_core::DnsUpdateRequest::new();
    request.add("example.com", ["@"]);
    request.add("example.org", ["home"]);

    let report = vrd_core::publish(&publisher, &request, IP).await.unwrap();
    assert_eq!(report.provider, "namecheap");
    assert_eq!(report.domains.len(), 2);
}
