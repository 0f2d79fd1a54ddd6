//! Write decisions emitted by the evaluator

use level_model::{PointConfig, PointId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One write command to issue against the process
///
/// Decisions come out of the evaluator in a fixed order and downstream
/// dispatch executes them in that sequence, so ordering is part of the
/// contract, not an implementation detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriteDecision {
    /// Static configuration of the target point, handed through to dispatch
    pub config: PointConfig,
    /// Target point
    pub point: PointId,
    /// Value to write (0/1 for digital points, the clamped level for analog)
    pub value: i64,
}

impl WriteDecision {
    /// Create a write decision
    pub fn new(config: PointConfig, point: PointId, value: i64) -> Self {
        Self {
            config,
            point,
            value,
        }
    }
}

impl fmt::Display for WriteDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "write {} <- {}", self.point, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let d = WriteDecision::new(PointConfig::discrete(), PointId::digital(3001), 0);
        assert_eq!(d.to_string(), "write D:3001 <- 0");
    }
}
