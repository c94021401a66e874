//! Prompt templates for readiness report generation.
//!
//! Domain logic for rendering assessment responses into the provider prompt.
//! Provider-agnostic: every client sends the same rendered contract.

use crate::catalog;
use crate::client::types::Message;
use crate::model::Response;

/// The JSON shape every provider must return. Declared once; the parser in
/// `report` and all client implementations validate against this same
/// contract.
pub const REPORT_SCHEMA: &str = r#"{
  "overallReadiness": string,
  "executiveSummary": string,
  "keyStrengths": string[],
  "criticalGaps": string[],
  "roadmap": [
    { "phase": string, "action": string, "impact": string }
  ]
}"#;

/// Rendered prompt ready for the provider.
#[derive(Debug, Clone)]
pub struct ReportPrompt {
    pub template_slug: String,
    pub system: String,
    pub user: String,
}

impl ReportPrompt {
    pub fn to_messages(&self) -> Vec<Message> {
        vec![Message::system(&self.system), Message::user(&self.user)]
    }
}

/// A report prompt template with placeholders.
#[derive(Debug, Clone, Copy)]
pub struct ReportPromptTemplate {
    pub slug: &'static str,
    pub system: &'static str,
    pub user: &'static str,
}

impl ReportPromptTemplate {
    /// Render the template for a response list.
    ///
    /// Deterministic: same responses in, same prompt out.
    pub fn render(&self, responses: &[Response]) -> ReportPrompt {
        let user = self
            .user
            .replace("{assessment_data}", &render_responses_text(responses))
            .replace("{report_schema}", REPORT_SCHEMA);

        ReportPrompt {
            template_slug: self.slug.to_string(),
            system: self.system.trim().to_string(),
            user: user.trim().to_string(),
        }
    }
}

/// Render one `"<label>: Score <n>/10"` line per response, in response order.
///
/// An id that does not resolve against the catalog renders as a visible
/// placeholder line rather than failing: this is a display string headed for
/// an LLM, and one bad id must not abort the whole report.
pub fn render_responses_text(responses: &[Response]) -> String {
    responses
        .iter()
        .map(|r| match catalog::dimension_by_id(&r.dimension_id) {
            Some(dim) => format!("{}: Score {}/10", dim.label, r.score),
            None => format!("Dimension {}: Score {}/10", r.dimension_id, r.score),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// Standard prompts
// =============================================================================

pub const REPORT_PROMPT_V1: ReportPromptTemplate = ReportPromptTemplate {
    slug: "readiness_v1",
    system: "You are an AI Cloud FinOps expert.",
    user: r#"You are an expert in Cloud FinOps and AI cost governance.

Analyze the following AI Cost Readiness Assessment scores for an organization across 10 dimensions.
Scores range from 0 (not implemented) to 10 (fully optimized).

Assessment Data:
{assessment_data}

Produce a JSON response with the following schema:
{report_schema}

The tone should be concise, professional, and actionable for a CTO or VP Engineering."#,
};

pub const DEFAULT_PROMPT: ReportPromptTemplate = REPORT_PROMPT_V1;

// =============================================================================
// TESTS
// =============================================================================
