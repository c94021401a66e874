//! Score aggregation: overall percentage and the per-dimension chart series.
//!
//! Pure functions over a response list. Both are total: any coverage of the
//! catalog (including none) produces a well-defined result.

use serde::Serialize;

use crate::catalog::{DIMENSIONS, MAX_DIMENSION_SCORE};
use crate::model::Response;

/// Aggregate score for a set of responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scorecard {
    /// Sum of all recorded scores.
    pub total_score: u32,
    /// Best possible score for this many responses.
    pub max_score: u32,
    /// `round(100 * total / max)`, or 0 for an empty response list.
    pub score_percentage: u8,
}

/// One spoke of the radar chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub label: &'static str,
    pub value: u8,
    pub max: u8,
}

/// Compute the overall scorecard for a response list.
pub fn scorecard(responses: &[Response]) -> Scorecard {
    let total_score: u32 = responses.iter().map(|r| u32::from(r.score)).sum();
    let max_score = responses.len() as u32 * u32::from(MAX_DIMENSION_SCORE);

    let score_percentage = if max_score == 0 {
        0
    } else {
        ((100.0 * total_score as f64) / max_score as f64).round() as u8
    };

    Scorecard {
        total_score,
        max_score,
        score_percentage,
    }
}

/// Build the radar series: one point per catalog dimension, in catalog order.
///
/// A dimension with no matching response contributes a zero value. That is the
/// intended rendering for partial data, not an error.
pub fn chart_series(responses: &[Response]) -> Vec<ChartPoint> {
    DIMENSIONS
        .iter()
        .map(|dim| {
            let score = responses
                .iter()
                .find(|r| r.dimension_id == dim.id)
                .map(|r| r.score)
                .unwrap_or(0);
            ChartPoint {
                label: dim.label,
                value: score,
                max: MAX_DIMENSION_SCORE,
            }
        })
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DIMENSION_COUNT;

    fn full_responses(score: u8) -> Vec<Response> {
        DIMENSIONS
            .iter()
            .map(|d| Response::new(d.id, score))
            .collect()
    }

    #[test]
    fn empty_input_scores_zero() {
        let card = scorecard(&[]);
        assert_eq!(card.total_score, 0);
        assert_eq!(card.max_score, 0);
        assert_eq!(card.score_percentage, 0);
    }

    #[test]
    fn all_tens_is_one_hundred_percent() {
        let card = scorecard(&full_responses(10));
        assert_eq!(card.total_score, 100);
        assert_eq!(card.max_score, 100);
        assert_eq!(card.score_percentage, 100);
    }

    #[test]
    fn all_zeros_is_zero_percent() {
        assert_eq!(scorecard(&full_responses(0)).score_percentage, 0);
    }

    #[test]
    fn half_tens_half_zeros_is_fifty_percent() {
        let responses: Vec<Response> = DIMENSIONS
            .iter()
            .enumerate()
            .map(|(i, d)| Response::new(d.id, if i < 5 { 10 } else { 0 }))
            .collect();
        assert_eq!(scorecard(&responses).score_percentage, 50);
    }

    #[test]
    fn percentage_rounds_to_nearest() {
        // 3 responses of 5 → 50/100 exactly; 1 of 5 → 50; 2 of [5, 10] → 75.
        let responses = vec![
            Response::new(DIMENSIONS[0].id, 5),
            Response::new(DIMENSIONS[1].id, 10),
        ];
        assert_eq!(scorecard(&responses).score_percentage, 75);

        // 1/3 coverage: 10/30 → 33.33 → 33.
        let responses = vec![
            Response::new(DIMENSIONS[0].id, 10),
            Response::new(DIMENSIONS[1].id, 0),
            Response::new(DIMENSIONS[2].id, 0),
        ];
        assert_eq!(scorecard(&responses).score_percentage, 33);
    }

    #[test]
    fn percentage_stays_in_range() {
        for coverage in 1..=DIMENSION_COUNT {
            for score in [0u8, 5, 10] {
                let responses: Vec<Response> = DIMENSIONS[..coverage]
                    .iter()
                    .map(|d| Response::new(d.id, score))
                    .collect();
                let pct = scorecard(&responses).score_percentage;
                assert!(pct <= 100, "coverage={coverage} score={score} pct={pct}");
            }
        }
    }

    #[test]
    fn chart_series_always_covers_the_catalog() {
        let series = chart_series(&[]);
        assert_eq!(series.len(), DIMENSION_COUNT);
        assert!(series.iter().all(|p| p.value == 0 && p.max == 10));

        let labels: Vec<&str> = series.iter().map(|p| p.label).collect();
        let expected: Vec<&str> = DIMENSIONS.iter().map(|d| d.label).collect();
        assert_eq!(labels, expected);
    }

    #[test]
    fn chart_series_order_is_catalog_order_not_response_order() {
        // Responses deliberately reversed and partial.
        let responses = vec![
            Response::new("roi_measurement", 10),
            Response::new("real_time_visibility", 5),
        ];
        let series = chart_series(&responses);
        assert_eq!(series[0].label, "Real-time Visibility");
        assert_eq!(series[0].value, 5);
        assert_eq!(series[9].label, "ROI Measurement");
        assert_eq!(series[9].value, 10);
        // Everything unanswered renders as zero.
        assert!(series[1..9].iter().all(|p| p.value == 0));
    }

    #[test]
    fn unknown_dimension_ids_do_not_appear_in_the_series() {
        let responses = vec![Response::new("not_a_dimension", 10)];
        let series = chart_series(&responses);
        assert_eq!(series.len(), DIMENSION_COUNT);
        assert!(series.iter().all(|p| p.value == 0));
    }
}
