//! Live Search API Contract Tests
//!
//! These tests verify the HTTP contract between the live-API service and its
//! upstream search endpoint, using a local mock server:
//! - Request parameters (credentials, 1-based start offset, clamped page size)
//! - Response mapping (HTML stripping, classification, extension fields)
//! - Fallback to the mock corpus on non-2xx, malformed body and timeout
//! - Per-request fallback: the next request tries the live path again

use std::time::{Duration, Instant};

use civic_portal::{Portal, PortalConfig, SearchScope};
use civic_search::{
    AggregatorConfig, LiveApiConfig, LiveApiService, ProviderSettings, ResponseSource,
    SearchRequest,
};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_PATH: &str = "/customsearch/v1";

fn live_config(server: &MockServer) -> LiveApiConfig {
    LiveApiConfig {
        api_key: Some("test-key".into()),
        engine_id: Some("test-cx".into()),
        base_url: format!("{}{API_PATH}", server.uri()),
        timeout_ms: 500,
        ..Default::default()
    }
}

fn service(server: &MockServer) -> LiveApiService {
    LiveApiService::new(&live_config(server), &AggregatorConfig::default()).expect("valid service")
}

fn upstream_body() -> serde_json::Value {
    json!({
        "items": [
            {
                "title": "<b>Metro</b> de Bogotá: nuevo tramo",
                "link": "https://noticias.example.co/metro",
                "snippet": "Avanza la obra del metro &amp; sus estaciones",
                "displayLink": "noticias.example.co",
                "pagemap": {"cse_thumbnail": [{"src": "https://img.example.co/metro.jpg"}]}
            },
            {
                "title": "Hospital expansion announced",
                "link": "https://health.example.org/news",
                "snippet": "The new wing doubles emergency capacity.",
                "displayLink": "health.example.org"
            }
        ],
        "searchInformation": {"totalResults": "42", "searchTime": 0.31}
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Request Format
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_request_carries_credentials_and_paging() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("key", "test-key"))
        .and(query_param("cx", "test-cx"))
        .and(query_param("q", "metro bogota"))
        .and(query_param("start", "11"))
        .and(query_param("num", "10"))
        .and(query_param("safe", "active"))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream_body()))
        .expect(1)
        .mount(&server)
        .await;

    let response = service(&server)
        .search(&SearchRequest::new("metro bogota").with_page(2).with_limit(10))
        .await
        .expect("search succeeds");
    assert_eq!(response.source, ResponseSource::LiveApi);
}

#[tokio::test]
async fn test_page_size_clamped_to_upstream_maximum() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("start", "11"))
        .and(query_param("num", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream_body()))
        .expect(1)
        .mount(&server)
        .await;

    let response = service(&server)
        .search(&SearchRequest::new("metro").with_page(2).with_limit(25))
        .await
        .expect("search succeeds");
    assert_eq!(response.source, ResponseSource::LiveApi);
    assert!(response.results.len() <= 10);
}

fn numbered_page(first: usize, count: usize, total: usize) -> serde_json::Value {
    let items: Vec<_> = (first..first + count)
        .map(|n| {
            json!({
                "title": format!("Result {n}"),
                "link": format!("https://x.example/{n}"),
                "snippet": "city council update"
            })
        })
        .collect();
    json!({"items": items, "searchInformation": {"totalResults": total.to_string()}})
}

#[tokio::test]
async fn test_oversized_limit_pages_without_gaps() {
    let server = MockServer::start().await;
    for first in [1, 11] {
        Mock::given(method("GET"))
            .and(path(API_PATH))
            .and(query_param("start", first.to_string()))
            .and(query_param("num", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(numbered_page(first, 10, 100)))
            .expect(1)
            .mount(&server)
            .await;
    }

    let service = service(&server);
    let mut seen = Vec::new();
    for page in [1, 2] {
        let response = service
            .search(&SearchRequest::new("council").with_page(page).with_limit(25))
            .await
            .expect("search succeeds");
        assert_eq!(response.source, ResponseSource::LiveApi);
        assert_eq!(response.total_results, 100);
        assert_eq!(response.total_pages, 10);
        let start_index = (page - 1) * 10;
        assert_eq!(
            response.results.len(),
            10.min(response.total_results - start_index)
        );
        seen.extend(response.results.into_iter().filter_map(|item| item.url));
    }

    let expected: Vec<String> = (1..=20).map(|n| format!("https://x.example/{n}")).collect();
    assert_eq!(seen, expected);
}

#[tokio::test]
async fn test_safe_search_off_when_disabled() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("safe", "off"))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream_body()))
        .expect(1)
        .mount(&server)
        .await;

    let config = LiveApiConfig {
        safe_search: false,
        ..live_config(&server)
    };
    let service = LiveApiService::new(&config, &AggregatorConfig::default()).expect("valid");
    let response = service.search(&SearchRequest::new("metro")).await.expect("ok");
    assert_eq!(response.source, ResponseSource::LiveApi);
}

// ────────────────────────────────────────────────────────────────────────────
// Response Mapping
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_hits_are_mapped_to_result_items() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream_body()))
        .mount(&server)
        .await;

    let response = service(&server)
        .search(&SearchRequest::new("metro").with_limit(5))
        .await
        .expect("search succeeds");

    assert_eq!(response.results.len(), 2);
    assert_eq!(response.total_results, 42);
    assert_eq!(response.total_pages, 9);
    assert!(response.has_more);
    assert!(response.provider_stats["live_api"].is_success());

    let first = &response.results[0];
    assert_eq!(first.title, "Metro de Bogotá: nuevo tramo");
    assert_eq!(first.summary, "Avanza la obra del metro & sus estaciones");
    assert_eq!(first.url.as_deref(), Some("https://noticias.example.co/metro"));
    assert_eq!(first.source, "noticias.example.co");
    assert_eq!(first.extra["country"], "Colombia");
    assert_eq!(first.extra["thumbnail"], "https://img.example.co/metro.jpg");
    assert_eq!(first.relevance_score, 98);

    let second = &response.results[1];
    assert_eq!(second.category, "health");
    assert_eq!(second.extra["country"], "Global");
    assert!(second.relevance_score < first.relevance_score);
}

#[tokio::test]
async fn test_total_results_capped_at_upstream_window() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [],
            "searchInformation": {"totalResults": "987654"}
        })))
        .mount(&server)
        .await;

    let response = service(&server)
        .search(&SearchRequest::new("metro"))
        .await
        .expect("search succeeds");
    assert_eq!(response.source, ResponseSource::LiveApi);
    assert_eq!(response.total_results, 100);
    assert!(response.results.is_empty());
}

#[tokio::test]
async fn test_category_filter_applies_to_live_hits() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"title": "Election day in congress", "link": "https://x.example/a"},
                {"title": "Senate election recount", "link": "https://x.example/b"},
                {"title": "Congress debates election law", "link": "https://x.example/c"}
            ],
            "searchInformation": {"totalResults": "57"}
        })))
        .mount(&server)
        .await;

    let service = service(&server);
    let filtered = service
        .search(&SearchRequest::new("congress").with_category("health"))
        .await
        .expect("search succeeds");
    assert_eq!(filtered.source, ResponseSource::LiveApi);
    assert!(filtered.results.is_empty());
    assert_eq!(filtered.total_results, 0);
    assert!(!filtered.has_more);

    let matching = service
        .search(&SearchRequest::new("congress").with_category("Politics"))
        .await
        .expect("search succeeds");
    assert_eq!(matching.results.len(), 3);
    assert!(matching.results.iter().all(|item| item.category == "politics"));
}

#[tokio::test]
async fn test_understated_upstream_total_is_raised_to_returned_count() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"title": "Only hit", "link": "https://x.example/only"}],
            "searchInformation": {"totalResults": "0"}
        })))
        .mount(&server)
        .await;

    let response = service(&server)
        .search(&SearchRequest::new("only"))
        .await
        .expect("search succeeds");
    assert_eq!(response.results.len(), 1);
    assert!(response.results.len() <= response.total_results);
    assert_eq!(response.total_pages, 1);
}

// ────────────────────────────────────────────────────────────────────────────
// Fallback
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_server_error_falls_back_to_mock() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let response = service(&server)
        .search(&SearchRequest::new("climate").with_limit(3))
        .await
        .expect("fallback never errors");
    assert_eq!(response.source, ResponseSource::MockFallback);
    assert!(response.results.len() <= 3);
    assert_eq!(response.total_pages, response.total_results.div_ceil(3));
    assert!(response.provider_stats.contains_key("mock"));
}

#[tokio::test]
async fn test_quota_error_falls_back_to_mock() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {"code": 429, "message": "Quota exceeded"}
        })))
        .mount(&server)
        .await;

    let response = service(&server)
        .search(&SearchRequest::new("health"))
        .await
        .expect("fallback never errors");
    assert_eq!(response.source, ResponseSource::MockFallback);
}

#[tokio::test]
async fn test_malformed_body_falls_back_to_mock() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let response = service(&server)
        .search(&SearchRequest::new("health"))
        .await
        .expect("fallback never errors");
    assert_eq!(response.source, ResponseSource::MockFallback);
}

#[tokio::test]
async fn test_slow_upstream_is_aborted_and_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(upstream_body())
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let started = Instant::now();
    let response = service(&server)
        .search(&SearchRequest::new("metro"))
        .await
        .expect("fallback never errors");
    assert_eq!(response.source, ResponseSource::MockFallback);
    assert!(started.elapsed() < Duration::from_secs(4));
}

#[tokio::test]
async fn test_next_request_retries_live_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream_body()))
        .mount(&server)
        .await;

    let service = service(&server);
    let first = service.search(&SearchRequest::new("metro")).await.expect("ok");
    assert_eq!(first.source, ResponseSource::MockFallback);
    assert!(service.is_configured());

    let second = service.search(&SearchRequest::new("metro")).await.expect("ok");
    assert_eq!(second.source, ResponseSource::LiveApi);
}

// ────────────────────────────────────────────────────────────────────────────
// Portal wiring
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_portal_live_scope_uses_configured_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream_body()))
        .expect(1)
        .mount(&server)
        .await;

    let config = PortalConfig {
        providers: ProviderSettings {
            simulated_latency_ms: (0, 0),
            ..Default::default()
        },
        live_api: live_config(&server),
        ..Default::default()
    };
    let portal = Portal::new(&config).expect("valid portal");
    assert!(portal.live().is_configured());

    let envelope = portal
        .search(SearchScope::Live, &SearchRequest::new("metro"))
        .await
        .expect("search succeeds");
    assert_eq!(envelope.response.source, ResponseSource::LiveApi);
    assert_eq!(envelope.scope, SearchScope::Live);
    assert!(!envelope.request_id.is_empty());
}
