//! Control Evaluator - the per-cycle decision function
//!
//! Given one snapshot batch of the seven monitored roles, produces the
//! ordered list of write commands for the cycle. Pure and time-independent:
//! the driver owns timing and I/O, this module owns every decision.
//!
//! The steps run in a fixed order every cycle:
//! 1. convert the setpoint K to the level domain
//! 2. read the discrete states
//! 3. safety interlock (only while K carries a low alarm)
//! 4. inflow mutual exclusion
//! 5. setpoint computation with `[0, egu_max]` clamping
//! 6. setpoint write when the value changed
//! 7. upper-bound inflow shutoff
//!
//! A cycle with no condition met produces an empty decision list. Emitted
//! writes converge the process over successive cycles; no state is carried
//! between evaluations.

use crate::decision::WriteDecision;
use crate::error::{ControlError, Result};
use crate::roles::{MonitoredSet, Role};
use level_model::{clamp_level, egu_to_level, to_egu, PointSnapshot};

/// One cycle's snapshots for the seven monitored roles, in role order
#[derive(Debug, Clone)]
pub struct SnapshotBatch {
    snapshots: [PointSnapshot; Role::COUNT],
}

impl SnapshotBatch {
    /// Build a batch from the points returned by storage
    ///
    /// Requires exactly one snapshot per role, in the order of
    /// [`MonitoredSet::identifiers`], each under the id the binding expects.
    /// Anything else fails the cycle.
    pub fn from_points(set: &MonitoredSet, points: Vec<PointSnapshot>) -> Result<Self> {
        if points.len() != Role::COUNT {
            return Err(ControlError::IncompleteBatch {
                expected: Role::COUNT,
                actual: points.len(),
            });
        }
        for (role, snapshot) in Role::ALL.iter().zip(points.iter()) {
            let expected = set.point(*role);
            if snapshot.id != expected {
                return Err(ControlError::RoleMismatch {
                    role: *role,
                    expected,
                    actual: snapshot.id,
                });
            }
        }
        // Length was checked above, the conversion cannot fail
        let snapshots: [PointSnapshot; Role::COUNT] = points
            .try_into()
            .map_err(|_| ControlError::IncompleteBatch {
                expected: Role::COUNT,
                actual: 0,
            })?;
        Ok(Self { snapshots })
    }

    /// Snapshot for the given role
    pub fn snapshot(&self, role: Role) -> &PointSnapshot {
        &self.snapshots[role.index()]
    }
}

/// Emit a write against a role's point, carrying its config as the handle
fn write(batch: &SnapshotBatch, role: Role, value: i64) -> WriteDecision {
    let snapshot = batch.snapshot(role);
    WriteDecision::new(snapshot.config.clone(), snapshot.id, value)
}

/// Evaluate one cycle and return the ordered write decisions
///
/// Pure function of the batch: no hidden state across calls, no I/O. The
/// returned order is the dispatch order.
pub fn evaluate(batch: &SnapshotBatch) -> Vec<WriteDecision> {
    let mut decisions = Vec::new();

    let k_snapshot = batch.snapshot(Role::K);
    let k = egu_to_level(to_egu(
        k_snapshot.config.scale_factor,
        k_snapshot.config.deviation,
        k_snapshot.raw_value,
    ));

    let t1 = batch.snapshot(Role::T1).discrete_state();
    let t2 = batch.snapshot(Role::T2).discrete_state();
    let t3 = batch.snapshot(Role::T3).discrete_state();
    let t4 = batch.snapshot(Role::T4).discrete_state();
    let i1 = batch.snapshot(Role::I1).discrete_state();
    let mut i2 = batch.snapshot(Role::I2).discrete_state();

    // Safety interlock on a setpoint low alarm. The three checks are
    // independent and all test the original snapshot values.
    if k_snapshot.alarm.is_low() {
        if t4 == 1 {
            decisions.push(write(batch, Role::T4, 0));
        }
        if i2 == 0 {
            decisions.push(write(batch, Role::I2, 1));
        }
        if i1 == 1 {
            decisions.push(write(batch, Role::I1, 0));
        }
    }

    // Both inflows active must never survive a cycle: shut off the
    // secondary and treat it as inactive for the rest of this evaluation.
    if i1 == 1 && i2 == 1 {
        decisions.push(write(batch, Role::I2, 0));
        i2 = 0;
    }

    let mut temp = k;
    if t1 == 1 {
        temp = temp.saturating_sub(1);
    }
    if t2 == 1 {
        temp = temp.saturating_sub(1);
    }
    if t3 == 1 {
        temp = temp.saturating_sub(1);
    }
    if t4 == 1 {
        temp = temp.saturating_sub(3);
    }
    if i1 == 1 {
        temp = temp.saturating_add(2);
    }
    if i2 == 1 {
        temp = temp.saturating_add(3);
    }

    let egu_max = egu_to_level(k_snapshot.config.egu_max);
    let temp = clamp_level(temp, k_snapshot.config.egu_max);

    if temp != k {
        decisions.push(write(batch, Role::K, temp));
    }

    // At the upper bound no inflow may stay on. Uses the same i1/i2 the
    // setpoint computation used, not re-read after the setpoint write.
    if temp >= egu_max {
        if i1 == 1 {
            decisions.push(write(batch, Role::I1, 0));
        }
        if i2 == 1 {
            decisions.push(write(batch, Role::I2, 0));
        }
    }

    decisions
}
