//! Development placeholder client.
//!
//! Returns the canned report without calling any provider. This is a
//! deliberate, whole-report substitution chosen at wiring time when no
//! credential is configured; it is never used as a fallback for a failed
//! live call.

use async_trait::async_trait;
use tracing::warn;

use super::error::ReportError;
use super::ReportClient;
use crate::model::Response;
use crate::report::{placeholder_report, Report};

#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderReportClient;

#[async_trait]
impl ReportClient for PlaceholderReportClient {
    async fn generate(&self, _responses: &[Response]) -> Result<Report, ReportError> {
        warn!("no provider configured; returning placeholder report");
        Ok(placeholder_report())
    }
}
