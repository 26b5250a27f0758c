//! Integration tests using a mock control plane
//!
//! Tests the full end-to-end flow: typed request → HTTP calls with marker
//! threading → per-page outcomes in the sink.

use gridctl::client::ApiClient;
use gridctl::config::ApiConfig;
use gridctl::ops::{ClusterState, ListClustersRequest, ListStepsRequest};
use gridctl::output::CollectSink;
use gridctl::pager::{PageDriver, PagerOptions, StopReason};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

fn test_config(endpoint: &str) -> ApiConfig {
    ApiConfig {
        endpoint: endpoint.to_string(),
        max_retries: 0,
        initial_backoff_ms: 1,
        max_backoff_ms: 5,
        ..ApiConfig::default()
    }
}

/// Matches requests whose JSON body carries no marker field
struct NoMarker;

impl Match for NoMarker {
    fn matches(&self, request: &Request) -> bool {
        serde_json::from_slice::<serde_json::Value>(&request.body)
            .map(|body| body.get("marker").is_none())
            .unwrap_or(false)
    }
}

// ============================================================================
// Full Drain
// ============================================================================

#[tokio::test]
async fn test_drains_three_pages_threading_the_marker() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/ListClusters"))
        .and(body_partial_json(json!({"marker": "T1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "clusters": [{"id": "c-2", "name": "adhoc", "state": "WAITING"}],
            "marker": "T2"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/ListClusters"))
        .and(body_partial_json(json!({"marker": "T2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "clusters": [{"id": "c-3", "name": "batch", "state": "TERMINATED"}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/ListClusters"))
        .and(NoMarker)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "clusters": [{"id": "c-1", "name": "etl", "state": "RUNNING"}],
            "marker": "T1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(test_config(&server.uri())).unwrap();
    let driver = PageDriver::new("ListClusters", PagerOptions::new());
    let mut sink = CollectSink::new();

    let report = driver
        .run(&client, ListClustersRequest::default(), &mut sink)
        .await;

    assert_eq!(report.stop_reason, StopReason::Drained);
    assert_eq!(report.pages_fetched, 3);
    assert_eq!(report.items_seen, 3);
    assert_eq!(report.resume_token, None);

    let pages = sink.pages();
    assert_eq!(pages.len(), 3);
    assert_eq!(pages[0][0]["id"], "c-1");
    assert_eq!(pages[1][0]["id"], "c-2");
    assert_eq!(pages[2][0]["id"], "c-3");
}

#[tokio::test]
async fn test_filter_fields_survive_every_page() {
    let server = MockServer::start().await;

    // Both calls must carry the caller's filters alongside the marker
    Mock::given(method("POST"))
        .and(path("/v1/ListSteps"))
        .and(body_partial_json(json!({
            "clusterId": "c-1",
            "stepStates": ["PENDING"],
            "marker": "T1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"steps": []})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/ListSteps"))
        .and(body_partial_json(json!({
            "clusterId": "c-1",
            "stepStates": ["PENDING"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "steps": [{"id": "s-1", "name": "ingest", "state": "PENDING"}],
            "marker": "T1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(test_config(&server.uri())).unwrap();
    let request = ListStepsRequest {
        cluster_id: "c-1".to_string(),
        step_states: vec![gridctl::ops::StepState::Pending],
        marker: None,
    };
    let mut sink = CollectSink::new();

    let report = PageDriver::new("ListSteps", PagerOptions::new())
        .run(&client, request, &mut sink)
        .await;

    assert_eq!(report.stop_reason, StopReason::Drained);
    assert_eq!(report.pages_fetched, 2);
}

// ============================================================================
// User-Controlled Paging
// ============================================================================

#[tokio::test]
async fn test_starting_token_fetches_exactly_one_page() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/ListClusters"))
        .and(body_partial_json(json!({"marker": "T9"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "clusters": [{"id": "c-9", "name": "late", "state": "RUNNING"}],
            "marker": "T10"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(test_config(&server.uri())).unwrap();
    let options = PagerOptions::new().with_starting_token(Some("T9".to_string()));
    let mut sink = CollectSink::new();

    let report = PageDriver::new("ListClusters", options)
        .run(&client, ListClustersRequest::default(), &mut sink)
        .await;

    assert_eq!(report.stop_reason, StopReason::SinglePage);
    assert_eq!(report.pages_fetched, 1);
    assert_eq!(report.resume_token.as_deref(), Some("T10"));
    assert_eq!(sink.pages().len(), 1);
}

#[tokio::test]
async fn test_no_paginate_fetches_exactly_one_page() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/ListClusters"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "clusters": [{"id": "c-1", "name": "etl", "state": "STARTING"}],
            "marker": "T1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(test_config(&server.uri())).unwrap();
    let options = PagerOptions::new().with_no_auto_iteration(true);
    let mut sink = CollectSink::new();

    let report = PageDriver::new("ListClusters", options)
        .run(
            &client,
            ListClustersRequest {
                cluster_states: vec![ClusterState::Starting],
                ..Default::default()
            },
            &mut sink,
        )
        .await;

    assert_eq!(report.stop_reason, StopReason::SinglePage);
    assert_eq!(report.resume_token.as_deref(), Some("T1"));
}

// ============================================================================
// Failure Mid-Sequence
// ============================================================================

#[tokio::test]
async fn test_failure_after_first_page_keeps_delivered_pages() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/ListClusters"))
        .and(body_partial_json(json!({"marker": "T1"})))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": "InvalidMarker",
            "message": "marker expired"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/ListClusters"))
        .and(NoMarker)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "clusters": [{"id": "c-1", "name": "etl", "state": "RUNNING"}],
            "marker": "T1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(test_config(&server.uri())).unwrap();
    let mut sink = CollectSink::new();

    let report = PageDriver::new("ListClusters", PagerOptions::new())
        .run(&client, ListClustersRequest::default(), &mut sink)
        .await;

    assert_eq!(report.stop_reason, StopReason::Failed);
    assert_eq!(report.pages_fetched, 1);
    assert_eq!(sink.pages().len(), 1);
    assert_eq!(sink.failures(), 1);
    // The failure outcome comes after the delivered page
    assert!(sink.outcomes[0].is_page());
    assert!(sink.outcomes[1].is_failed());
}

// ============================================================================
// Raw Passthrough
// ============================================================================

#[tokio::test]
async fn test_raw_passthrough_emits_one_summary_document() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/ListClusters"))
        .and(body_partial_json(json!({"marker": "T1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "clusters": [{"id": "c-2", "name": "adhoc", "state": "WAITING"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/ListClusters"))
        .and(NoMarker)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "clusters": [{"id": "c-1", "name": "etl", "state": "RUNNING"}],
            "marker": "T1"
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(test_config(&server.uri())).unwrap();
    let mut sink = CollectSink::new();

    let report = PageDriver::new("ListClusters", PagerOptions::new())
        .raw_passthrough()
        .run(&client, ListClustersRequest::default(), &mut sink)
        .await;

    assert_eq!(report.stop_reason, StopReason::Drained);
    assert_eq!(report.pages_fetched, 2);

    let pages = sink.pages();
    assert_eq!(pages.len(), 1);
    assert_eq!(
        *pages[0],
        json!({
            "operation": "ListClusters",
            "pagesFetched": 2,
            "itemsSeen": 2,
            "resumeToken": null
        })
    );
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn test_bearer_token_sent_on_every_page() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/ListClusters"))
        .and(header("authorization", "Bearer secret"))
        .and(body_partial_json(json!({"marker": "T1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"clusters": []})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/ListClusters"))
        .and(header("authorization", "Bearer secret"))
        .and(NoMarker)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "clusters": [],
            "marker": "T1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server.uri()).with_auth_token("secret");
    let client = ApiClient::new(config).unwrap();
    let mut sink = CollectSink::new();

    let report = PageDriver::new("ListClusters", PagerOptions::new())
        .run(&client, ListClustersRequest::default(), &mut sink)
        .await;

    assert_eq!(report.stop_reason, StopReason::Drained);
    assert_eq!(report.pages_fetched, 2);
}
