//! Application controller: the state machine over the whole session.
//!
//! Landing → Assessment → Analyzing → Results, plus the failure edge back to
//! Landing. The controller exclusively owns the response list and the report
//! for one session; resetting drops both. Every invalid transition is a
//! rejected error, not a silent no-op.

use thiserror::Error;
use tracing::warn;

use crate::client::{ReportClient, ReportError};
use crate::flow::{AssessmentFlow, FlowError, SelectOutcome};
use crate::model::Response;
use crate::report::Report;
use crate::score::{self, ChartPoint, Scorecard};

/// The message shown to the user on any generation failure. Underlying
/// detail goes to the log, never to the user.
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate report. Please try again.";

/// Where the application currently is.
#[derive(Debug)]
pub enum AppState {
    Landing,
    Assessment(AssessmentFlow),
    /// Assessment complete; the single outbound report call is pending.
    Analyzing { responses: Vec<Response> },
    Results {
        responses: Vec<Response>,
        report: Report,
    },
}

impl AppState {
    fn name(&self) -> &'static str {
        match self {
            AppState::Landing => "landing",
            AppState::Assessment(_) => "assessment",
            AppState::Analyzing { .. } => "analyzing",
            AppState::Results { .. } => "results",
        }
    }
}

/// Everything the results view needs: aggregate score, radar series, report.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentOutcome {
    pub scorecard: Scorecard,
    pub chart_series: Vec<ChartPoint>,
    pub report: Report,
}

#[derive(Debug, Error)]
pub enum ControllerError {
    /// The caller attempted a transition that is not an edge of the state
    /// machine. A logic error in the caller, not a runtime condition.
    #[error("invalid transition: cannot {action} from the {state} state")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
    #[error(transparent)]
    Flow(#[from] FlowError),
}

/// Orchestrates one assessment session at a time.
pub struct AppController {
    state: AppState,
    last_error: Option<String>,
}

impl AppController {
    pub fn new() -> Self {
        Self {
            state: AppState::Landing,
            last_error: None,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// The user-visible message from the most recent failure, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The in-progress flow, while in the assessment state.
    pub fn flow(&self) -> Option<&AssessmentFlow> {
        match &self.state {
            AppState::Assessment(flow) => Some(flow),
            _ => None,
        }
    }

    /// The results snapshot, while in the results state.
    pub fn outcome(&self) -> Option<AssessmentOutcome> {
        match &self.state {
            AppState::Results { responses, report } => Some(AssessmentOutcome {
                scorecard: score::scorecard(responses),
                chart_series: score::chart_series(responses),
                report: report.clone(),
            }),
            _ => None,
        }
    }

    /// Start (or retake) the assessment: valid from Landing and Results.
    ///
    /// Clears any previous responses, report and error; the new flow begins
    /// at the first dimension.
    pub fn start_assessment(&mut self) -> Result<(), ControllerError> {
        match self.state {
            AppState::Landing | AppState::Results { .. } => {
                self.state = AppState::Assessment(AssessmentFlow::new());
                self.last_error = None;
                Ok(())
            }
            _ => Err(self.invalid("start an assessment")),
        }
    }

    /// Record a score for the current dimension. When this completes the
    /// flow, the controller moves to Analyzing and holds the final responses
    /// for the report call.
    pub fn select(&mut self, selected_score: u8) -> Result<(), ControllerError> {
        let AppState::Assessment(flow) = &mut self.state else {
            return Err(self.invalid("select a score"));
        };
        if let SelectOutcome::Completed(responses) = flow.select(selected_score)? {
            self.state = AppState::Analyzing { responses };
        }
        Ok(())
    }

    /// Navigate back one dimension.
    pub fn previous(&mut self) -> Result<(), ControllerError> {
        let AppState::Assessment(flow) = &mut self.state else {
            return Err(self.invalid("navigate back"));
        };
        flow.previous()?;
        Ok(())
    }

    /// Run the single outbound report call for the completed assessment.
    ///
    /// On success the controller moves to Results with the report stored
    /// alongside the responses that produced it. On failure it returns to
    /// Landing with a generic user-visible message; the session is discarded
    /// and the user restarts the full assessment.
    pub async fn generate_report(
        &mut self,
        client: &dyn ReportClient,
    ) -> Result<(), ControllerError> {
        let AppState::Analyzing { responses } = &self.state else {
            return Err(self.invalid("generate a report"));
        };
        let responses = responses.clone();

        // Exclusive &mut borrow across this await: at most one report call
        // is ever outstanding, and no stale result can be applied to a newer
        // session.
        match client.generate(&responses).await {
            Ok(report) => {
                self.state = AppState::Results { responses, report };
                self.last_error = None;
                Ok(())
            }
            Err(err) => {
                self.fail(err);
                Ok(())
            }
        }
    }

    fn fail(&mut self, err: ReportError) {
        warn!(code = err.code(), error = %err, "report generation failed");
        self.state = AppState::Landing;
        self.last_error = Some(GENERATION_FAILED_MESSAGE.to_string());
    }

    fn invalid(&self, action: &'static str) -> ControllerError {
        ControllerError::InvalidTransition {
            action,
            state: self.state.name(),
        }
    }
}

impl Default for AppController {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================
