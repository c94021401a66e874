//! The assessment flow state machine.
//!
//! Walks the user through the catalog one dimension at a time, collecting one
//! score per dimension. Revisiting a dimension via `previous()` and selecting
//! again overwrites the earlier score; it never duplicates. Selecting at the
//! last dimension completes the flow and emits the final response list in
//! catalog order.

use thiserror::Error;

use crate::catalog::{self, Dimension, DIMENSIONS, DIMENSION_COUNT};
use crate::model::Response;

/// Where the flow currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    /// Presenting the dimension at this catalog index (0-based).
    AtDimension(usize),
    /// All ten dimensions scored; the final response list has been emitted.
    Completed,
}

/// Result of a successful `select`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Moved on to the dimension at `next_index`.
    Advanced { next_index: usize },
    /// The last dimension was scored; these are the final responses,
    /// one per catalog dimension, in catalog order.
    Completed(Vec<Response>),
}

/// Contract violations by the caller. The flow state is unchanged after any
/// of these.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlowError {
    #[error("invalid score {0}: must be one of the option values (0, 5, 10)")]
    InvalidScore(u8),
    #[error("already at the first dimension")]
    AtFirstDimension,
    #[error("assessment already completed")]
    AlreadyCompleted,
}

/// One in-progress assessment session. In-memory only; discarded on reset.
#[derive(Debug, Clone)]
pub struct AssessmentFlow {
    index: usize,
    completed: bool,
    responses: Vec<Response>,
}

impl AssessmentFlow {
    /// Start a fresh flow at the first dimension with no responses.
    pub fn new() -> Self {
        Self {
            index: 0,
            completed: false,
            responses: Vec::with_capacity(DIMENSION_COUNT),
        }
    }

    pub fn state(&self) -> FlowState {
        if self.completed {
            FlowState::Completed
        } else {
            FlowState::AtDimension(self.index)
        }
    }

    /// The dimension currently being presented, or `None` once completed.
    pub fn current_dimension(&self) -> Option<&'static Dimension> {
        if self.completed {
            None
        } else {
            Some(&DIMENSIONS[self.index])
        }
    }

    /// Completion fraction for display: (index + 1) / N while in progress,
    /// 1.0 once completed.
    pub fn progress(&self) -> f64 {
        if self.completed {
            1.0
        } else {
            (self.index + 1) as f64 / DIMENSION_COUNT as f64
        }
    }

    /// Responses recorded so far, in selection order.
    pub fn responses(&self) -> &[Response] {
        &self.responses
    }

    /// The score already recorded for the current dimension, if the user has
    /// been here before.
    pub fn current_score(&self) -> Option<u8> {
        let dim = self.current_dimension()?;
        self.responses
            .iter()
            .find(|r| r.dimension_id == dim.id)
            .map(|r| r.score)
    }

    /// Record `score` for the current dimension and advance.
    ///
    /// Scores outside the option set are rejected, never clamped. At the last
    /// dimension this completes the flow; completion is driven by reaching the
    /// last index, not by a separate action.
    pub fn select(&mut self, score: u8) -> Result<SelectOutcome, FlowError> {
        if self.completed {
            return Err(FlowError::AlreadyCompleted);
        }
        if !catalog::is_valid_score(score) {
            return Err(FlowError::InvalidScore(score));
        }

        let dimension_id = DIMENSIONS[self.index].id;
        match self
            .responses
            .iter_mut()
            .find(|r| r.dimension_id == dimension_id)
        {
            Some(existing) => existing.score = score,
            None => self.responses.push(Response::new(dimension_id, score)),
        }

        if self.index < DIMENSION_COUNT - 1 {
            self.index += 1;
            Ok(SelectOutcome::Advanced {
                next_index: self.index,
            })
        } else {
            self.completed = true;
            Ok(SelectOutcome::Completed(self.final_responses()))
        }
    }

    /// Move back one dimension without discarding recorded responses.
    pub fn previous(&mut self) -> Result<usize, FlowError> {
        if self.completed {
            return Err(FlowError::AlreadyCompleted);
        }
        if self.index == 0 {
            return Err(FlowError::AtFirstDimension);
        }
        self.index -= 1;
        Ok(self.index)
    }

    /// The completed response list, ordered by catalog order rather than
    /// selection order (revisits can reorder selection).
    fn final_responses(&self) -> Vec<Response> {
        DIMENSIONS
            .iter()
            .filter_map(|dim| {
                self.responses
                    .iter()
                    .find(|r| r.dimension_id == dim.id)
                    .cloned()
            })
            .collect()
    }
}

impl Default for AssessmentFlow {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================
