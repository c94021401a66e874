use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use readiness_harness::client::{ErrorKind, RelayReportClient, ReportClient, ReportError};
use readiness_harness::relay::{router, RelayState};
use readiness_harness::report::{placeholder_report, Report};
use readiness_harness::{Response, DIMENSIONS};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// Helpers
// =============================================================================

/// Stub client: succeeds with the placeholder report or fails with a
/// provider error, depending on wiring.
struct StubClient {
    fail: bool,
}

#[async_trait]
impl ReportClient for StubClient {
    async fn generate(&self, _responses: &[Response]) -> Result<Report, ReportError> {
        if self.fail {
            Err(ReportError::provider("stubbed failure"))
        } else {
            Ok(placeholder_report())
        }
    }
}

async fn spawn_relay(state: RelayState) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });
    addr
}

fn full_responses(score: u8) -> Vec<Response> {
    DIMENSIONS
        .iter()
        .map(|d| Response::new(d.id, score))
        .collect()
}

// =============================================================================
// Relay host behavior
// =============================================================================

#[tokio::test]
async fn relay_returns_the_report_on_success() {
    let addr = spawn_relay(RelayState::new(Arc::new(StubClient { fail: false }))).await;

    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/api/generate-report"))
        .json(&json!({ "responses": full_responses(5) }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let report: Report = resp.json().await.unwrap();
    assert_eq!(report, placeholder_report());
}

#[tokio::test]
async fn relay_rejects_non_post_methods() {
    let addr = spawn_relay(RelayState::new(Arc::new(StubClient { fail: false }))).await;

    let resp = reqwest::Client::new()
        .get(format!("http://{addr}/api/generate-report"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 405);
}

#[tokio::test]
async fn relay_without_credential_reports_server_misconfiguration() {
    let addr = spawn_relay(RelayState::misconfigured()).await;

    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/api/generate-report"))
        .json(&json!({ "responses": full_responses(5) }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 500);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("credential"));
}

#[tokio::test]
async fn relay_rejects_missing_or_non_array_responses() {
    let addr = spawn_relay(RelayState::new(Arc::new(StubClient { fail: false }))).await;
    let client = reqwest::Client::new();
    let url = format!("http://{addr}/api/generate-report");

    let resp = client.post(&url).json(&json!({})).send().await.unwrap();
    assert_eq!(resp.status(), 400);

    let resp = client
        .post(&url)
        .json(&json!({ "responses": "not-a-list" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn relay_failure_body_is_generic() {
    let addr = spawn_relay(RelayState::new(Arc::new(StubClient { fail: true }))).await;

    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/api/generate-report"))
        .json(&json!({ "responses": full_responses(5) }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 502);
    let body: serde_json::Value = resp.json().await.unwrap();
    // Sub-causes are intentionally not exposed to relay callers.
    assert_eq!(body["error"], "report generation failed");
    assert!(!body.to_string().contains("stubbed failure"));
}

// =============================================================================
// Relay-backed client classification
// =============================================================================

#[tokio::test]
async fn relay_client_round_trips_through_a_live_relay() {
    let addr = spawn_relay(RelayState::new(Arc::new(StubClient { fail: false }))).await;

    let client = RelayReportClient::new(format!("http://{addr}/api/generate-report")).unwrap();
    let report = client.generate(&full_responses(10)).await.unwrap();
    assert_eq!(report, placeholder_report());
}

#[tokio::test]
async fn relay_client_maps_bad_request_to_client_input() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-report"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({ "error": "'responses' array is required" })),
        )
        .mount(&server)
        .await;

    let client = RelayReportClient::new(format!("{}/api/generate-report", server.uri())).unwrap();
    let err = client.generate(&[]).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ClientInput);
}

#[tokio::test]
async fn relay_client_maps_misconfigured_host_to_configuration() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-report"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({ "error": "missing provider credential on relay host" })),
        )
        .mount(&server)
        .await;

    let client = RelayReportClient::new(format!("{}/api/generate-report", server.uri())).unwrap();
    let err = client.generate(&full_responses(5)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[tokio::test]
async fn relay_client_maps_generic_failures_to_provider() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-report"))
        .respond_with(
            ResponseTemplate::new(502).set_body_json(json!({ "error": "report generation failed" })),
        )
        .mount(&server)
        .await;

    let client = RelayReportClient::new(format!("{}/api/generate-report", server.uri())).unwrap();
    let err = client.generate(&full_responses(5)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Provider);
}

#[tokio::test]
async fn relay_client_rejects_success_bodies_that_are_not_reports() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-report"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "hello": "world" })))
        .mount(&server)
        .await;

    let client = RelayReportClient::new(format!("{}/api/generate-report", server.uri())).unwrap();
    let err = client.generate(&full_responses(5)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Schema);
}
