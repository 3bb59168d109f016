//! Engine error types.

use crate::models::ComponentCategory;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CapacityError>;

/// Errors produced by the normalization and extrapolation engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CapacityError {
    /// A single benchmark row could not be turned into a usable record.
    /// Batch entry points drop such rows instead of returning this.
    #[error("malformed benchmark record: {0}")]
    MalformedRecord(String),

    #[error("no feasible {category} baseline: {reason}")]
    NoFeasibleBaseline {
        category: ComponentCategory,
        reason: String,
    },

    #[error("invalid target: {0}")]
    InvalidTarget(String),
}

impl CapacityError {
    pub(crate) fn no_baseline(category: ComponentCategory, reason: impl Into<String>) -> Self {
        Self::NoFeasibleBaseline {
            category,
            reason: reason.into(),
        }
    }

    /// True when the caller should report "no data available" rather than
    /// a bad request.
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoFeasibleBaseline { .. })
    }
}
