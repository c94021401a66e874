//! Relay endpoint that keeps the provider credential server-side.
//!
//! A thin axum host for `POST /api/generate-report`: browsers and CLIs post
//! the raw response list, the relay forwards it through its own report client
//! and returns the report JSON. Failure bodies are deliberately generic; the
//! relay does not expose provider sub-causes to its callers.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response as HttpResponse};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::client::ReportClient;
use crate::model::Response;

/// Shared state for the relay.
#[derive(Clone)]
pub struct RelayState {
    /// The report client, or `None` when the host is missing its credential.
    /// A misconfigured relay still serves requests so callers get a clear
    /// server-side error instead of a connection failure.
    client: Option<Arc<dyn ReportClient>>,
}

impl RelayState {
    pub fn new(client: Arc<dyn ReportClient>) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// A relay with no usable provider credential.
    pub fn misconfigured() -> Self {
        Self { client: None }
    }
}

/// Build the relay router. Non-POST methods on the route get a 405 from the
/// method router itself.
pub fn router(state: RelayState) -> Router {
    Router::new()
        .route("/api/generate-report", post(generate_report_handler))
        .with_state(state)
}

async fn generate_report_handler(
    State(state): State<RelayState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> HttpResponse {
    let Some(client) = state.client else {
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "missing provider credential on relay host",
        );
    };

    let responses = match parse_responses(payload) {
        Ok(responses) => responses,
        Err(message) => return error_response(StatusCode::BAD_REQUEST, &message),
    };

    match client.generate(&responses).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(err) => {
            warn!(code = err.code(), error = %err, "relay report generation failed");
            error_response(StatusCode::BAD_GATEWAY, "report generation failed")
        }
    }
}

/// Validate the `{ "responses": [...] }` body shape before any provider call.
fn parse_responses(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Vec<Response>, String> {
    let Json(body) = payload.map_err(|e| format!("invalid JSON body: {e}"))?;

    let responses = body
        .get("responses")
        .cloned()
        .ok_or_else(|| "'responses' array is required".to_string())?;
    if !responses.is_array() {
        return Err("'responses' must be an array".to_string());
    }

    serde_json::from_value(responses).map_err(|e| format!("invalid 'responses' entries: {e}"))
}

fn error_response(status: StatusCode, message: &str) -> HttpResponse {
    (status, Json(json!({ "error": message }))).into_response()
}

/// Bind and serve the relay until the process exits.
pub async fn serve(bind: SocketAddr, state: RelayState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("relay listening on {bind}");
    axum::serve(listener, router(state)).await
}
