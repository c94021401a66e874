//! Core wire types shared across the assessment pipeline.

use serde::{Deserialize, Serialize};

/// A user's recorded score for one dimension.
///
/// A completed assessment holds exactly one response per catalog dimension,
/// in catalog order. Partial lists (during the flow, or arriving at the relay)
/// are valid inputs to the aggregator and the prompt builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// References a `catalog::Dimension` by its stable id.
    pub dimension_id: String,
    /// One of the three option values: 0, 5 or 10.
    pub score: u8,
}

impl Response {
    pub fn new(dimension_id: impl Into<String>, score: u8) -> Self {
        Self {
            dimension_id: dimension_id.into(),
            score,
        }
    }
}
