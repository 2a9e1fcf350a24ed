//! Tests for the HTTP transport module

use super::*;
use crate::error::Error;
use crate::types::{BackoffType, QueryParams};
use serde::Deserialize;
use std::time::Duration;
use test_case::test_case;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Deserialize)]
struct Named {
    id: u32,
    name: String,
}

/// Transport against the mock catalog with 10ms constant backoff
fn transport(server: &MockServer, max_retries: u32) -> HttpClient {
    HttpClient::with_config(HttpClientConfig {
        base_url: Some(format!("{}/api", server.uri())),
        max_retries,
        initial_backoff: Duration::from_millis(10),
        backoff_type: BackoffType::Constant,
        rate_limit: None,
        ..HttpClientConfig::default()
    })
    .unwrap()
}

fn rick() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": 1, "name": "Rick Sanchez"}))
}

fn no_query() -> QueryParams {
    QueryParams::new()
}

#[test]
fn test_default_transport_settings() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(8));
    assert_eq!(config.max_retries, 3);
    assert_eq!(config.backoff_type, BackoffType::Exponential);
    assert!(config.base_url.is_none());
    assert!(config.rate_limit.is_some());
    assert!(config.user_agent.starts_with("multiverse-catalog/"));
}

#[test_case("/character", "http://catalog.test/api/character" ; "leading slash")]
#[test_case("character/2", "http://catalog.test/api/character/2" ; "bare path")]
#[test_case(
    "https://rickandmortyapi.com/api/episode/28",
    "https://rickandmortyapi.com/api/episode/28" ;
    "absolute episode reference"
)]
fn test_build_url(reference: &str, expected: &str) {
    let client = HttpClient::with_config(HttpClientConfig {
        base_url: Some("http://catalog.test/api/".to_string()),
        rate_limit: None,
        ..HttpClientConfig::default()
    })
    .unwrap();
    assert_eq!(client.build_url(reference), expected);
}

#[test_case(BackoffType::Constant, 4 => Duration::from_millis(100) ; "constant")]
#[test_case(BackoffType::Linear, 2 => Duration::from_millis(300) ; "linear")]
#[test_case(BackoffType::Exponential, 2 => Duration::from_millis(400) ; "exponential")]
#[test_case(BackoffType::Exponential, 10 => Duration::from_millis(500) ; "exponential capped")]
#[test_case(BackoffType::Linear, u32::MAX => Duration::from_millis(500) ; "linear overflow capped")]
fn test_backoff_delay(backoff_type: BackoffType, attempt: u32) -> Duration {
    let client = HttpClient::with_config(HttpClientConfig {
        initial_backoff: Duration::from_millis(100),
        max_backoff: Duration::from_millis(500),
        backoff_type,
        rate_limit: None,
        ..HttpClientConfig::default()
    })
    .unwrap();
    client.backoff_delay(attempt)
}

#[tokio::test]
async fn test_get_json_sends_query_and_user_agent() {
    let server = MockServer::start().await;
    let agent = format!("multiverse-catalog/{}", env!("CARGO_PKG_VERSION"));

    Mock::given(method("GET"))
        .and(path("/api/character"))
        .and(query_param("name", "rick"))
        .and(query_param("page", "2"))
        .and(header("user-agent", agent.as_str()))
        .respond_with(rick())
        .expect(1)
        .mount(&server)
        .await;

    let query: QueryParams = [("name", "rick"), ("page", "2")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let named: Named = transport(&server, 0)
        .get_json("/character", &query)
        .await
        .unwrap();

    assert_eq!(named.id, 1);
    assert_eq!(named.name, "Rick Sanchez");
}

#[tokio::test]
async fn test_empty_query_leaves_url_bare() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/character/1"))
        .and(query_param_is_missing("page"))
        .respond_with(rick())
        .expect(1)
        .mount(&server)
        .await;

    let named: Named = transport(&server, 0)
        .get_json("/character/1", &no_query())
        .await
        .unwrap();
    assert_eq!(named.id, 1);
}

#[test_case(500 ; "internal error")]
#[test_case(502 ; "bad gateway")]
#[test_case(503 ; "unavailable")]
#[test_case(504 ; "gateway timeout")]
#[tokio::test]
async fn test_transient_status_is_retried(status: u16) {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/character/1"))
        .respond_with(ResponseTemplate::new(status))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/character/1"))
        .respond_with(rick())
        .expect(1)
        .mount(&server)
        .await;

    let named: Named = transport(&server, 2)
        .get_json("/character/1", &no_query())
        .await
        .unwrap();
    assert_eq!(named.name, "Rick Sanchez");
}

#[tokio::test]
async fn test_outage_surfaces_last_status_after_retries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/character"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .expect(3)
        .mount(&server)
        .await;

    let err = transport(&server, 2)
        .get_json::<Named>("/character", &no_query())
        .await
        .unwrap_err();

    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

#[test_case(400 ; "bad request")]
#[test_case(404 ; "no match")]
#[test_case(501 ; "not implemented")]
#[tokio::test]
async fn test_permanent_status_fails_on_first_attempt(status: u16) {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/character"))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_json(serde_json::json!({"error": "There is nothing here"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = transport(&server, 3)
        .get_json::<Named>("/character", &no_query())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: s, .. } if s == status));
    assert_eq!(err.is_not_found(), status == 404);
}

#[test_case("<html>oops</html>" ; "not json")]
#[test_case(r#"{"id": "one", "name": "Rick"}"# ; "wrong shape")]
#[tokio::test]
async fn test_undecodable_success_body_fails_closed(body: &str) {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/character/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(&server)
        .await;

    let err = transport(&server, 3)
        .get_json::<Named>("/character/1", &no_query())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Decode { .. }), "got {err:?}");
}

#[test_case(None ; "no header")]
#[test_case(Some("soon") ; "unparseable header")]
#[tokio::test]
async fn test_rate_limit_without_usable_retry_after_uses_backoff(retry_after: Option<&str>) {
    let server = MockServer::start().await;

    let mut limited = ResponseTemplate::new(429);
    if let Some(value) = retry_after {
        limited = limited.insert_header("retry-after", value);
    }
    Mock::given(method("GET"))
        .and(path("/api/character/1"))
        .respond_with(limited)
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/character/1"))
        .respond_with(rick())
        .mount(&server)
        .await;

    let client = transport(&server, 1);
    let query = no_query();
    let fetch = client.get_json::<Named>("/character/1", &query);
    let named = tokio::time::timeout(Duration::from_secs(2), fetch)
        .await
        .expect("429 retry should wait the 10ms backoff")
        .unwrap();
    assert_eq!(named.id, 1);
}

#[tokio::test]
async fn test_rate_limit_honours_retry_after_seconds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/character/1"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "0"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/character/1"))
        .respond_with(rick())
        .expect(1)
        .mount(&server)
        .await;

    let named: Named = transport(&server, 1)
        .get_json("/character/1", &no_query())
        .await
        .unwrap();
    assert_eq!(named.id, 1);
}

#[test_case(None, 10 ; "backoff when header missing")]
#[test_case(Some("3600"), 10_000 ; "long header capped at max backoff")]
#[tokio::test]
async fn test_rate_limit_exhausted_reports_wait(retry_after: Option<&str>, expected_ms: u64) {
    let server = MockServer::start().await;

    let mut limited = ResponseTemplate::new(429);
    if let Some(value) = retry_after {
        limited = limited.insert_header("retry-after", value);
    }
    Mock::given(method("GET"))
        .and(path("/api/character"))
        .respond_with(limited)
        .expect(1)
        .mount(&server)
        .await;

    let err = transport(&server, 0)
        .get_json::<Named>("/character", &no_query())
        .await
        .unwrap_err();

    match err {
        Error::RateLimited { retry_after_ms } => assert_eq!(retry_after_ms, expected_ms),
        other => panic!("Expected RateLimited, got {other:?}"),
    }
}

#[tokio::test]
async fn test_refused_connection_is_http_error_after_retries() {
    let client = HttpClient::with_config(HttpClientConfig {
        base_url: Some("http://127.0.0.1:1/api".to_string()),
        max_retries: 1,
        initial_backoff: Duration::from_millis(10),
        rate_limit: None,
        ..HttpClientConfig::default()
    })
    .unwrap();

    let err = client
        .get_json::<Named>("/character/1", &no_query())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Http(ref e) if e.is_connect()), "got {err:?}");
}

#[tokio::test]
async fn test_slow_catalog_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/character/1"))
        .respond_with(rick().set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let client = HttpClient::with_config(HttpClientConfig {
        base_url: Some(format!("{}/api", server.uri())),
        timeout: Duration::from_millis(50),
        max_retries: 0,
        rate_limit: None,
        ..HttpClientConfig::default()
    })
    .unwrap();

    let err = client
        .get_json::<Named>("/character/1", &no_query())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Timeout { timeout_ms: 50 }));
}
