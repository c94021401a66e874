//! Relay-backed report client.
//!
//! Posts the raw response list to a same-origin relay endpoint that holds the
//! provider credential server-side. The relay returns either the report JSON
//! or a deliberately generic error body; status codes are the only sub-cause
//! signal it exposes.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::json;

use super::error::{ErrorContext, ReportError};
use super::ReportClient;
use crate::model::Response;
use crate::report::{parse_report, Report};

/// Client for a relay endpoint speaking the `{ "responses": [...] }` contract.
#[derive(Debug, Clone)]
pub struct RelayReportClient {
    client: reqwest::Client,
    endpoint: String,
}

impl RelayReportClient {
    /// Create for a full endpoint URL, e.g.
    /// `http://localhost:8080/api/generate-report`.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ReportError> {
        Self::with_timeout(endpoint, Duration::from_secs(120))
    }

    pub fn with_timeout(
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ReportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ReportError::config(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl ReportClient for RelayReportClient {
    async fn generate(&self, responses: &[Response]) -> Result<Report, ReportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "responses": responses }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let detail = relay_error_detail(&body).unwrap_or_else(|| format!("HTTP {status}"));
            return Err(match status {
                // The relay rejected the request body before calling any
                // provider.
                StatusCode::BAD_REQUEST => ReportError::client_input(detail),
                // The relay host itself is missing its credential.
                StatusCode::INTERNAL_SERVER_ERROR => {
                    ReportError::config(format!("relay misconfigured: {detail}"))
                }
                // Everything else is the relay's generic failure; it does not
                // distinguish sub-causes to its callers.
                _ => ReportError::provider_with_context(
                    detail,
                    ErrorContext::new().with_status(status.as_u16()),
                ),
            });
        }

        parse_report(&body)
    }
}

fn relay_error_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .and_then(|e| e.as_str())
        .map(|s| s.to_string())
}
