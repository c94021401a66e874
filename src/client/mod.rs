//! Report clients: the single seam between the assessment flow and the AI
//! provider.
//!
//! One capability, several interchangeable implementations selected at wiring
//! time: a direct OpenRouter adapter, a relay-backed client that keeps the
//! credential server-side, and a development placeholder. Nothing above this
//! trait branches on provider identity.

pub mod error;
pub mod openrouter;
pub mod placeholder;
pub mod relay;
pub mod types;

use crate::model::Response;
use crate::report::Report;

pub use error::{ErrorContext, ErrorKind, ReportError};
pub use openrouter::OpenRouterReportClient;
pub use placeholder::PlaceholderReportClient;
pub use relay::RelayReportClient;
pub use types::{Message, Role};

/// Generates a readiness report from a completed response list.
///
/// Single attempt, no retry: the call is awaited to completion or failure,
/// and the payload is either fully accepted or fully rejected.
#[async_trait::async_trait]
pub trait ReportClient: Send + Sync {
    async fn generate(&self, responses: &[Response]) -> Result<Report, ReportError>;
}
