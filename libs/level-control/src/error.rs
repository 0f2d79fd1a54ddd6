//! Control Core Error Types

use crate::roles::Role;
use level_model::PointId;
use thiserror::Error;

/// Result type for control operations
pub type Result<T> = std::result::Result<T, ControlError>;

/// Control core errors
#[derive(Debug, Error)]
pub enum ControlError {
    /// Snapshot batch did not contain one entry per monitored role
    #[error("Incomplete snapshot batch: expected {expected} points, got {actual}")]
    IncompleteBatch { expected: usize, actual: usize },

    /// A snapshot arrived under a different identifier than the role binding
    #[error("Snapshot for role {role:?} has id {actual}, binding expects {expected}")]
    RoleMismatch {
        role: Role,
        expected: PointId,
        actual: PointId,
    },
}
