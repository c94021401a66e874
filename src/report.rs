//! The structured report contract and its parser.
//!
//! One schema, shared by every client implementation: the relay host, the
//! direct provider client and the relay-backed client all validate against
//! the `Report` shape defined here.

use serde::{Deserialize, Serialize};

use crate::client::ReportError;

/// One step of the recommended roadmap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapItem {
    /// Timeframe, e.g. "Immediate", "Q2", "Long-term".
    pub phase: String,
    /// Specific action to take.
    pub action: String,
    /// Expected business impact.
    pub impact: String,
}

/// The structured readiness report returned by the provider.
///
/// Either fully present or the flow is in an error state; no partial report
/// is ever surfaced. Array fields may legitimately be empty but must be
/// present as arrays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Short label for the overall state, e.g. "Emerging", "Maturing".
    pub overall_readiness: String,
    /// 2-3 sentence summary of the assessment.
    pub executive_summary: String,
    /// Top performing areas.
    pub key_strengths: Vec<String>,
    /// Areas needing attention.
    pub critical_gaps: Vec<String>,
    pub roadmap: Vec<RoadmapItem>,
}

/// Parse raw model output into a `Report`.
///
/// The full payload is accepted or rejected in one pass: a missing required
/// field, a wrong field type, or output that is not JSON at all is a schema
/// violation.
pub fn parse_report(raw: &str) -> Result<Report, ReportError> {
    let json_str = extract_json(raw);
    serde_json::from_str(json_str).map_err(|e| ReportError::schema(e.to_string()))
}

/// Extract the first JSON object from model output (handles models that wrap
/// the JSON in surrounding prose).
fn extract_json(raw: &str) -> &str {
    let trimmed = raw.trim();

    if let Some(start) = trimmed.find('{') {
        let remainder = &trimmed[start..];
        let mut depth = 0;
        let mut in_string = false;
        let mut escaped = false;
        for (i, c) in remainder.char_indices() {
            if in_string {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == '"' {
                    in_string = false;
                }
                continue;
            }
            match c {
                '"' => in_string = true,
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return &remainder[..=i];
                    }
                }
                _ => {}
            }
        }
    }

    trimmed
}

/// The canned report used when report generation is wired to the development
/// placeholder instead of a live provider.
///
/// This is an explicit, whole-report substitution chosen at wiring time. It
/// is never mixed with or patched into a genuine provider response.
pub fn placeholder_report() -> Report {
    Report {
        overall_readiness: "Moderate".to_string(),
        executive_summary: "Please configure your API Key to get a real analysis. Your \
                            organization shows promise in basic visibility but lacks advanced \
                            control mechanisms."
            .to_string(),
        key_strengths: vec!["Initial Setup".to_string(), "Basic Tracking".to_string()],
        critical_gaps: vec![
            "Real-time alerting".to_string(),
            "Unit Economics".to_string(),
        ],
        roadmap: vec![
            RoadmapItem {
                phase: "Immediate".to_string(),
                action: "Implement a proxy gateway".to_string(),
                impact: "High".to_string(),
            },
            RoadmapItem {
                phase: "Short-term".to_string(),
                action: "Setup budget alerts".to_string(),
                impact: "Medium".to_string(),
            },
        ],
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ErrorKind;

    const VALID: &str = r#"{
        "overallReadiness": "Maturing",
        "executiveSummary": "Solid visibility, weak forecasting.",
        "keyStrengths": ["Real-time Visibility"],
        "criticalGaps": ["Forecast Capability"],
        "roadmap": [
            {"phase": "Immediate", "action": "Add budget alerts", "impact": "High"}
        ]
    }"#;

    #[test]
    fn parses_a_complete_report() {
        let report = parse_report(VALID).unwrap();
        assert_eq!(report.overall_readiness, "Maturing");
        assert_eq!(report.roadmap.len(), 1);
        assert_eq!(report.roadmap[0].phase, "Immediate");
    }

    #[test]
    fn parses_json_wrapped_in_prose() {
        let raw = format!("Here is your report:\n{VALID}\nLet me know if you need more.");
        let report = parse_report(&raw).unwrap();
        assert_eq!(report.overall_readiness, "Maturing");
    }

    #[test]
    fn missing_roadmap_is_a_schema_violation() {
        let raw = r#"{
            "overallReadiness": "Maturing",
            "executiveSummary": "ok",
            "keyStrengths": [],
            "criticalGaps": []
        }"#;
        let err = parse_report(raw).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
    }

    #[test]
    fn empty_arrays_are_valid() {
        let raw = r#"{
            "overallReadiness": "Emerging",
            "executiveSummary": "ok",
            "keyStrengths": [],
            "criticalGaps": [],
            "roadmap": []
        }"#;
        let report = parse_report(raw).unwrap();
        assert!(report.key_strengths.is_empty());
        assert!(report.roadmap.is_empty());
    }

    #[test]
    fn wrong_field_type_is_a_schema_violation() {
        let raw = r#"{
            "overallReadiness": "Emerging",
            "executiveSummary": "ok",
            "keyStrengths": "not-an-array",
            "criticalGaps": [],
            "roadmap": []
        }"#;
        assert_eq!(parse_report(raw).unwrap_err().kind(), ErrorKind::Schema);
    }

    #[test]
    fn non_json_output_is_a_schema_violation() {
        assert_eq!(
            parse_report("I'd rate you a solid seven.").unwrap_err().kind(),
            ErrorKind::Schema
        );
    }

    #[test]
    fn braces_inside_strings_do_not_truncate_extraction() {
        let raw = r#"{
            "overallReadiness": "Emerging {beta}",
            "executiveSummary": "ok",
            "keyStrengths": [],
            "criticalGaps": [],
            "roadmap": []
        } trailing text"#;
        let report = parse_report(raw).unwrap();
        assert_eq!(report.overall_readiness, "Emerging {beta}");
    }

    #[test]
    fn report_round_trips_through_wire_names() {
        let report = placeholder_report();
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"overallReadiness\""));
        assert!(json.contains("\"keyStrengths\""));
        let back: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
