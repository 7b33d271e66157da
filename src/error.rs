use thiserror::Error;

use crate::model::entity::GuestId;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("table size must be at least 1, got {0}")]
    InvalidTableSize(usize),
    #[error("guest id {0} appears more than once")]
    DuplicateGuest(GuestId),
    #[error("assignment has {actual} seats but the plan has {expected}")]
    AssignmentSize { expected: usize, actual: usize },
    #[error("unknown gender token {0:?}")]
    UnknownGender(String),
    #[error("malformed guest data: {0}")]
    Json(#[from] serde_json::Error),
}
