//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: YAML config → HTTP requests → accumulated records

use serde_json::json;
use solidafy_pager::{FetchErrorKind, PageOutcome, PagerConfig, Person, Record, SkipReason};
use std::sync::Once;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn person(uuid: &str, first: &str, postcode: serde_json::Value) -> serde_json::Value {
    json!({
        "gender": "male",
        "name": {"title": "Mr", "first": first, "last": "Tester"},
        "location": {
            "street": {"number": 42, "name": "Main Street"},
            "city": "Springfield",
            "state": "Oregon",
            "country": "United States",
            "postcode": postcode,
            "coordinates": {"latitude": "44.0462", "longitude": "-123.0220"},
            "timezone": {"offset": "-8:00", "description": "Pacific Time (US & Canada)"}
        },
        "email": format!("{first}@example.com"),
        "login": {"uuid": uuid, "username": first},
        "dob": {"date": "1990-04-01T12:00:00.000Z", "age": 36},
        "phone": "(555) 010-0000",
        "cell": "(555) 010-0001",
        "picture": {
            "large": "https://randomuser.me/api/portraits/men/1.jpg",
            "medium": "https://randomuser.me/api/portraits/med/men/1.jpg",
            "thumbnail": "https://randomuser.me/api/portraits/thumb/men/1.jpg"
        },
        "nat": "US"
    })
}

fn envelope(page: u32, people: Vec<serde_json::Value>) -> serde_json::Value {
    let count = people.len();
    json!({
        "results": people,
        "info": {"seed": "abc123", "results": count, "page": page, "version": "1.4"}
    })
}

async fn mount_page(server: &MockServer, page: u32, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/"))
        .and(query_param("page", page.to_string()))
        .and(query_param("results", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

fn config_for(server: &MockServer) -> PagerConfig {
    let yaml = format!(
        r#"
endpoint: "{}/api/?page={{{{ page }}}}&results={{{{ page_size }}}}"
page_size: 2
http:
  timeout_secs: 5
  headers:
    X-Client: pager-tests
"#,
        server.uri()
    );
    PagerConfig::from_yaml_str(&yaml).unwrap()
}

fn uuids(people: &[Person]) -> Vec<String> {
    people.iter().map(|p| p.id().to_string()).collect()
}

// ============================================================================
// End-to-End Pagination Tests
// ============================================================================

#[tokio::test]
async fn test_scroll_to_end_of_feed() {
    init_tracing();
    let server = MockServer::start().await;

    mount_page(
        &server,
        1,
        envelope(1, vec![person("A", "alan", json!(97401)), person("B", "bob", json!("97402"))]),
    )
    .await;
    mount_page(
        &server,
        2,
        envelope(2, vec![person("C", "carl", json!("K1A 0B1")), person("D", "dan", json!(10001))]),
    )
    .await;
    mount_page(&server, 3, envelope(3, vec![])).await;

    let pager = config_for(&server).build_pager::<Person>().unwrap();

    // First render bootstraps the feed
    let outcome = pager.on_visible(None).await.unwrap();
    assert!(matches!(outcome, PageOutcome::Appended { page: 1, count: 2 }));

    // Rows above the last one do nothing
    assert!(pager.on_visible(Some("A")).await.is_none());

    // Last row visible: next page
    let outcome = pager.on_visible(Some("B")).await.unwrap();
    assert!(matches!(outcome, PageOutcome::Appended { page: 2, count: 2 }));

    // Last row of page 2: the empty page ends the feed
    let outcome = pager.on_visible(Some("D")).await.unwrap();
    assert!(matches!(outcome, PageOutcome::Exhausted { page: 3 }));

    // Exhausted: no further network traffic
    let outcome = pager.on_visible(Some("D")).await.unwrap();
    assert!(matches!(outcome, PageOutcome::Skipped(SkipReason::Exhausted)));

    let people = pager.records();
    assert_eq!(uuids(&people), vec!["A", "B", "C", "D"]);
    assert_eq!(people[0].full_name(), "Mr alan Tester");
    assert_eq!(people[2].location.postcode.to_string(), "K1A 0B1");
    assert_eq!(pager.next_page(), 3);
    assert!(!pager.has_more());
    assert!(!pager.is_loading());
}

#[tokio::test]
async fn test_server_error_is_retried_on_next_trigger() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(503).set_body_string("try later"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(1, vec![person("A", "alan", json!(1))])),
        )
        .mount(&server)
        .await;

    let pager = config_for(&server).build_pager::<Person>().unwrap();

    let outcome = pager.request_next_page().await;
    let error = outcome.error().unwrap();
    assert_eq!(error.kind(), FetchErrorKind::Server { status: 503 });
    assert!(error.is_retryable());
    assert!(pager.is_empty());
    assert_eq!(pager.next_page(), 1);
    assert!(pager.has_more());

    let outcome = pager.request_next_page().await;
    assert!(matches!(outcome, PageOutcome::Appended { page: 1, count: 1 }));
    assert_eq!(pager.len(), 1);
}

#[tokio::test]
async fn test_malformed_page_is_not_merged() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"login": {"uuid": "half-a-person"}}],
            "info": {"results": 1, "page": 1}
        })))
        .mount(&server)
        .await;

    let pager = config_for(&server).build_pager::<Person>().unwrap();

    let outcome = pager.request_next_page().await;
    assert_eq!(
        outcome.error().map(solidafy_pager::Error::kind),
        Some(FetchErrorKind::Decode)
    );
    let error = outcome.error().unwrap();
    assert!(error.is_retryable());
    assert!(error.is_likely_to_repeat());
    assert!(pager.is_empty());
    assert_eq!(pager.next_page(), 1);
}

#[tokio::test]
async fn test_concurrent_triggers_fetch_once() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(1, vec![person("A", "alan", json!(1))]))
                .set_delay(std::time::Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let pager = config_for(&server).build_pager::<Person>().unwrap();

    let (first, second) = tokio::join!(pager.request_next_page(), pager.request_next_page());

    let appended = [&first, &second].iter().filter(|o| o.is_appended()).count();
    let skipped = [&first, &second]
        .iter()
        .filter(|o| matches!(o, PageOutcome::Skipped(SkipReason::Loading)))
        .count();
    assert_eq!(appended, 1);
    assert_eq!(skipped, 1);
    assert_eq!(pager.len(), 1);
}

#[tokio::test]
async fn test_configured_headers_are_sent() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("X-Client", "pager-tests"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(1, vec![])))
        .expect(1)
        .mount(&server)
        .await;

    let pager = config_for(&server).build_pager::<Person>().unwrap();
    assert!(pager.request_next_page().await.is_exhausted());
}

#[tokio::test]
async fn test_reset_restarts_from_first_page() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(1, vec![person("A", "alan", json!(1))])),
        )
        .expect(2)
        .mount(&server)
        .await;

    let pager = config_for(&server).build_pager::<Person>().unwrap();

    pager.request_next_page().await;
    assert_eq!(pager.next_page(), 2);

    pager.reset();
    assert!(pager.is_empty());

    pager.request_next_page().await;
    assert_eq!(uuids(&pager.records()), vec!["A"]);
    assert_eq!(pager.snapshot().generation, 1);
}
