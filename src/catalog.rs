//! The fixed assessment catalog: ten readiness dimensions and the three
//! scoring options presented for each of them.
//!
//! Process-wide constants, defined in display order. Nothing here is ever
//! mutated at runtime; every other module resolves dimensions through this
//! table.

use serde::{Deserialize, Serialize};

/// Grouping of dimensions on the results view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Visibility,
    Control,
    #[serde(rename = "Business Value")]
    BusinessValue,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Visibility => "Visibility",
            Category::Control => "Control",
            Category::BusinessValue => "Business Value",
        }
    }
}

/// One readiness criterion being scored.
#[derive(Debug, Clone, Copy)]
pub struct Dimension {
    /// Stable identifier used on the wire and in stored responses.
    pub id: &'static str,
    /// Short name shown in the chart and in prompt lines.
    pub label: &'static str,
    /// One-line explanation of the dimension's focus.
    pub description: &'static str,
    pub category: Category,
    /// Question presented to the user.
    pub question: &'static str,
}

/// One of the three maturity levels a dimension can be scored at.
#[derive(Debug, Clone, Copy)]
pub struct ScoreOption {
    /// Points awarded: 0, 5 or 10.
    pub value: u8,
    pub label: &'static str,
    pub description: &'static str,
}

/// Number of dimensions in a complete assessment.
pub const DIMENSION_COUNT: usize = DIMENSIONS.len();

/// Maximum score a single dimension contributes.
pub const MAX_DIMENSION_SCORE: u8 = 10;

/// The ten assessment dimensions, in presentation order:
/// three Visibility, three Control, four Business Value.
pub const DIMENSIONS: [Dimension; 10] = [
    Dimension {
        id: "real_time_visibility",
        label: "Real-time Visibility",
        description: "Ability to see AI costs as they accumulate.",
        category: Category::Visibility,
        question: "Can you see AI costs as they accumulate, rather than days later?",
    },
    Dimension {
        id: "allocation_capability",
        label: "Allocation Capability",
        description: "Tracing costs to specific features or users.",
        category: Category::Visibility,
        question: "Can you trace costs to specific features, users, or workflows?",
    },
    Dimension {
        id: "continuous_monitoring",
        label: "Continuous Monitoring",
        description: "Real-time dashboards vs monthly reports.",
        category: Category::Visibility,
        question: "Are dashboards updated in real-time, rather than monthly or weekly?",
    },
    Dimension {
        id: "proxy_infrastructure",
        label: "Proxy Infrastructure",
        description: "Middleware for tagging and control.",
        category: Category::Control,
        question: "Do you have a layer (gateway/proxy) between your code and AI providers for tagging?",
    },
    Dimension {
        id: "alert_configuration",
        label: "Alert Configuration",
        description: "Speed of anomaly detection.",
        category: Category::Control,
        question: "Do you get notified of anomalies within minutes, not days?",
    },
    Dimension {
        id: "optimization_speed",
        label: "Optimization Speed",
        description: "Response time to cost issues.",
        category: Category::Control,
        question: "Can engineering respond to cost spikes or issues within hours?",
    },
    Dimension {
        id: "business_context",
        label: "Business Context",
        description: "Explaining costs in business terms.",
        category: Category::BusinessValue,
        question: "Can you explain AI costs to stakeholders in clear business terms?",
    },
    Dimension {
        id: "unit_economics",
        label: "Unit Economics",
        description: "Measuring cost per business outcome.",
        category: Category::BusinessValue,
        question: "Do you measure cost per business outcome, not just cost per service?",
    },
    Dimension {
        id: "forecast_capability",
        label: "Forecast Capability",
        description: "Predicting costs based on usage patterns.",
        category: Category::BusinessValue,
        question: "Can you predict AI costs based on user behavior patterns?",
    },
    Dimension {
        id: "roi_measurement",
        label: "ROI Measurement",
        description: "Connecting spend to value.",
        category: Category::BusinessValue,
        question: "Do you connect AI spending directly to the business value delivered?",
    },
];

/// The three-point maturity scale.
pub const OPTIONS: [ScoreOption; 3] = [
    ScoreOption {
        value: 0,
        label: "Not Implemented",
        description: "No visibility or manual, ad-hoc processes.",
    },
    ScoreOption {
        value: 5,
        label: "Partially Implemented",
        description: "Some tools or manual reporting exists, but lacks real-time context.",
    },
    ScoreOption {
        value: 10,
        label: "Fully Optimized",
        description: "Automated, real-time, and fully integrated into workflows.",
    },
];

/// Look up a dimension by its stable id.
pub fn dimension_by_id(id: &str) -> Option<&'static Dimension> {
    DIMENSIONS.iter().find(|d| d.id == id)
}

/// Whether `score` is one of the allowed option values.
pub fn is_valid_score(score: u8) -> bool {
    OPTIONS.iter().any(|o| o.value == score)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ten_dimensions_with_unique_ids() {
        assert_eq!(DIMENSION_COUNT, 10);
        let ids: HashSet<&str> = DIMENSIONS.iter().map(|d| d.id).collect();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn category_split_is_three_three_four() {
        let count = |c: Category| DIMENSIONS.iter().filter(|d| d.category == c).count();
        assert_eq!(count(Category::Visibility), 3);
        assert_eq!(count(Category::Control), 3);
        assert_eq!(count(Category::BusinessValue), 4);
    }

    #[test]
    fn option_values_are_the_three_point_scale() {
        let values: Vec<u8> = OPTIONS.iter().map(|o| o.value).collect();
        assert_eq!(values, vec![0, 5, 10]);
    }

    #[test]
    fn score_validation() {
        assert!(is_valid_score(0));
        assert!(is_valid_score(5));
        assert!(is_valid_score(10));
        assert!(!is_valid_score(7));
    }

    #[test]
    fn lookup_by_id() {
        assert_eq!(
            dimension_by_id("unit_economics").map(|d| d.label),
            Some("Unit Economics")
        );
        assert!(dimension_by_id("nonexistent").is_none());
    }
}
