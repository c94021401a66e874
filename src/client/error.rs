//! Error taxonomy for report generation.
//!
//! Four failure classes reach the controller: configuration (credential or
//! setup absent), client input (malformed request before any provider call),
//! provider (the call executed but failed or returned nothing), and schema
//! (a payload arrived but does not match the report contract). Transport
//! errors from reqwest fold into the provider class.

use thiserror::Error;

/// Coarse failure class, used for logging and uniform handling upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    ClientInput,
    Provider,
    Schema,
}

/// Additional context from provider responses for diagnostics.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// HTTP status code from the provider or relay.
    pub http_status: Option<u16>,
    /// Provider-specific error code (e.g. "rate_limit_exceeded").
    pub provider_code: Option<String>,
    /// Request ID from the provider (x-request-id header).
    pub request_id: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }
}

/// Errors that can occur while generating a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Credential or setup absent; no call was attempted (or the relay host
    /// reported itself misconfigured).
    #[error("configuration error: {0}")]
    Config(String),

    /// The request was malformed before any provider call.
    #[error("invalid request: {0}")]
    ClientInput(String),

    /// The provider call executed but failed, timed out, or returned no
    /// content.
    #[error("provider error: {message}")]
    Provider {
        message: String,
        context: Option<ErrorContext>,
    },

    /// A payload arrived but does not match the declared report shape.
    #[error("schema violation: {0}")]
    Schema(String),

    /// HTTP/network error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ReportError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn client_input(message: impl Into<String>) -> Self {
        Self::ClientInput(message.into())
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
            context: None,
        }
    }

    pub fn provider_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Provider {
            message: message.into(),
            context: Some(context),
        }
    }

    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema(message.into())
    }

    /// The failure class. Transport errors count as provider failures: the
    /// attempt was made and did not produce a report.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::Configuration,
            Self::ClientInput(_) => ErrorKind::ClientInput,
            Self::Provider { .. } | Self::Http(_) => ErrorKind::Provider,
            Self::Schema(_) => ErrorKind::Schema,
        }
    }

    /// Short code for log labels.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "config_error",
            Self::ClientInput(_) => "invalid_request",
            Self::Provider { .. } => "provider_error",
            Self::Schema(_) => "schema_violation",
            Self::Http(_) => "http_error",
        }
    }

    /// The error context if available.
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::Provider { context, .. } => context.as_ref(),
            _ => None,
        }
    }
}
