//! Direct OpenRouter adapter for report generation.
//!
//! Holds the provider credential locally and calls the chat-completions API
//! once per assessment. No retry: a failed attempt surfaces as an error and
//! the user restarts from the landing state.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::{ErrorContext, ReportError};
use super::types::{Message, Role};
use super::ReportClient;
use crate::model::Response;
use crate::prompts::DEFAULT_PROMPT;
use crate::report::{parse_report, Report};

/// Default model for report generation.
pub const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";

/// Low temperature keeps the report stable across runs for the same scores.
const REPORT_TEMPERATURE: f32 = 0.2;

/// Hard cap on response size (1MB); a readiness report is a few KB.
const MAX_RESPONSE_LEN: usize = 1_024 * 1_024;

/// OpenRouter chat-completions client for readiness reports.
#[derive(Debug, Clone)]
pub struct OpenRouterReportClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OpenRouterReportClient {
    /// Create from an API key with default endpoint, model and timeout.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ReportError> {
        Self::with_config(
            api_key,
            "https://openrouter.ai/api/v1",
            DEFAULT_MODEL,
            Duration::from_secs(120),
        )
    }

    /// Create from environment variables.
    ///
    /// `OPENROUTER_API_KEY` is required; `OPENROUTER_BASE_URL`,
    /// `READINESS_MODEL` and `OPENROUTER_TIMEOUT_SECONDS` are optional.
    pub fn from_env() -> Result<Self, ReportError> {
        let api_key = std::env::var("OPENROUTER_API_KEY")
            .map_err(|_| ReportError::config("OPENROUTER_API_KEY not set"))?;

        let base_url = std::env::var("OPENROUTER_BASE_URL")
            .unwrap_or_else(|_| "https://openrouter.ai/api/v1".into());

        let model = std::env::var("READINESS_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());

        let timeout = std::env::var("OPENROUTER_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(120));

        Self::with_config(api_key, base_url, model, timeout)
    }

    /// Create with custom configuration.
    pub fn with_config(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ReportError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ReportError::config("provider API key is empty"));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let auth_value = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|_| ReportError::config("invalid API key format"))?;
        headers.insert(AUTHORIZATION, auth_value);

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| ReportError::config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            model: model.into(),
        })
    }

    /// Override the model after construction (CLI `--model` wiring).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn extract_request_id(headers: &reqwest::header::HeaderMap) -> Option<String> {
        headers
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
    }
}

// =============================================================================
// API TYPES
// =============================================================================

#[derive(Serialize)]
struct ChatApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ApiMessage {
    role: &'static str,
    content: String,
}

impl From<Message> for ApiMessage {
    fn from(m: Message) -> Self {
        Self {
            role: match m.role {
                Role::System => "system",
                Role::User => "user",
                Role::Assistant => "assistant",
            },
            content: m.content,
        }
    }
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Deserialize)]
struct ChatApiResponse {
    choices: Option<Vec<Choice>>,
    usage: Option<Usage>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    prompt_tokens: Option<u32>,
    completion_tokens: Option<u32>,
}

#[derive(Deserialize)]
struct ApiError {
    message: Option<String>,
    code: Option<String>,
}

// =============================================================================
// REPORT CLIENT IMPL
// =============================================================================

#[async_trait]
impl ReportClient for OpenRouterReportClient {
    async fn generate(&self, responses: &[Response]) -> Result<Report, ReportError> {
        let prompt = DEFAULT_PROMPT.render(responses);
        let start = Instant::now();

        let api_req = ChatApiRequest {
            model: &self.model,
            messages: prompt.to_messages().into_iter().map(Into::into).collect(),
            temperature: REPORT_TEMPERATURE,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        let response = self
            .client
            .post(self.chat_url())
            .json(&api_req)
            .send()
            .await?;

        let status = response.status();
        let request_id = Self::extract_request_id(response.headers());

        let body = response.text().await?;
        if body.len() > MAX_RESPONSE_LEN {
            return Err(ReportError::provider(format!(
                "response too large: {} bytes",
                body.len()
            )));
        }

        let ctx = ErrorContext::new().with_status(status.as_u16());
        let ctx = match &request_id {
            Some(id) => ctx.with_request_id(id),
            None => ctx,
        };

        if !status.is_success() {
            if let Ok(parsed) = serde_json::from_str::<ChatApiResponse>(&body) {
                if let Some(error) = parsed.error {
                    let message = error.message.unwrap_or_default();
                    let ctx = match error.code {
                        Some(code) => ctx.with_code(code),
                        None => ctx,
                    };
                    return Err(ReportError::provider_with_context(message, ctx));
                }
            }
            return Err(ReportError::provider_with_context(
                format!("HTTP {}", status.as_u16()),
                ctx,
            ));
        }

        let parsed: ChatApiResponse = serde_json::from_str(&body)
            .map_err(|e| ReportError::provider(format!("invalid response JSON: {e}")))?;

        if let Some(error) = parsed.error {
            return Err(ReportError::provider_with_context(
                error.message.unwrap_or_default(),
                match error.code {
                    Some(code) => ctx.with_code(code),
                    None => ctx,
                },
            ));
        }

        let content = parsed
            .choices
            .and_then(|c| c.into_iter().next())
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(ReportError::provider_with_context(
                "empty response content",
                ctx,
            ));
        }

        if let Some(usage) = parsed.usage {
            debug!(
                model = %self.model,
                input_tokens = usage.prompt_tokens.unwrap_or(0),
                output_tokens = usage.completion_tokens.unwrap_or(0),
                latency_ms = start.elapsed().as_millis() as u64,
                "report generated"
            );
        }

        parse_report(&content)
    }
}
