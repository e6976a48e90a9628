//! Tests for the HTTP client module

use super::*;
use crate::error::{Error, FetchErrorKind};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use url::Url;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn url(server: &MockServer, rest: &str) -> Url {
    Url::parse(&format!("{}{rest}", server.uri())).unwrap()
}

fn client() -> HttpClient {
    HttpClient::with_config(HttpClientConfig::builder().no_rate_limit().build()).unwrap()
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.rate_limit.is_none());
    assert!(config.default_headers.is_empty());
    assert!(config.user_agent.starts_with("solidafy-pager/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .timeout(Duration::from_secs(5))
        .rate_limit(RateLimiterConfig::new(4, 2))
        .header("X-Custom", "value")
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.timeout, Duration::from_secs(5));
    assert_eq!(config.rate_limit, Some(RateLimiterConfig::new(4, 2)));
    assert_eq!(
        config.default_headers.get("X-Custom"),
        Some(&"value".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[tokio::test]
async fn test_get_text_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/"))
        .and(query_param("page", "2"))
        .and(query_param("results", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"results": []}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let body = client()
        .get_text(&url(&mock_server, "/api/?page=2&results=5"))
        .await
        .unwrap();

    assert_eq!(body, r#"{"results": []}"#);
}

#[tokio::test]
async fn test_get_text_sends_default_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/people"))
        .and(header("X-API-Key", "secret123"))
        .and(header("user-agent", "pager-test/2.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .header("X-API-Key", "secret123")
        .user_agent("pager-test/2.0")
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let body = client.get_text(&url(&mock_server, "/people")).await.unwrap();
    assert_eq!(body, "[]");
}

#[tokio::test]
async fn test_get_text_404_is_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
        .mount(&mock_server)
        .await;

    let err = client()
        .get_text(&url(&mock_server, "/missing"))
        .await
        .unwrap_err();

    assert!(matches!(
        &err,
        Error::HttpStatus { status: 404, body } if body == "Not found"
    ));
    assert_eq!(err.kind(), FetchErrorKind::Server { status: 404 });
}

#[tokio::test]
async fn test_get_text_500_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client()
        .get_text(&url(&mock_server, "/flaky"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), FetchErrorKind::Server { status: 500 });
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_get_text_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .timeout(Duration::from_millis(50))
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let err = client
        .get_text(&url(&mock_server, "/slow"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Timeout { timeout_ms: 50 }));
    assert_eq!(err.kind(), FetchErrorKind::Transport);
}

#[tokio::test]
async fn test_get_text_connection_refused() {
    // Nothing listens on port 1
    let target = Url::parse("http://127.0.0.1:1/api").unwrap();

    let err = client().get_text(&target).await.unwrap_err();

    assert!(matches!(err, Error::Http(_)));
    assert_eq!(err.kind(), FetchErrorKind::Transport);
}

#[tokio::test]
async fn test_get_text_error_status_with_truncated_body() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 1024];
        let _ = socket.read(&mut buf).await;
        // Promise 100 bytes, send 5, then hang up
        socket
            .write_all(b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 100\r\n\r\nshort")
            .await
            .unwrap();
    });

    let target = Url::parse(&format!("http://{addr}/truncated")).unwrap();
    let err = client().get_text(&target).await.unwrap_err();

    assert_eq!(err.kind(), FetchErrorKind::Server { status: 500 });
    match err {
        Error::HttpStatus { body, .. } => assert!(body.is_empty()),
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_http_client_with_rate_limiter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(200))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .rate_limit(RateLimiterConfig::new(100, 10))
        .build();
    let client = HttpClient::with_config(config).unwrap();
    assert!(client.has_rate_limiter());

    for _ in 0..3 {
        client.get_text(&url(&mock_server, "/data")).await.unwrap();
    }
}

#[test]
fn test_http_client_debug() {
    let client = HttpClient::new().unwrap();
    let debug_str = format!("{client:?}");
    assert!(debug_str.contains("HttpClient"));
    assert!(debug_str.contains("has_rate_limiter: false"));
}
