//! Monitored roles and their point bindings
//!
//! The control loop regulates a fixed set of seven roles. Which concrete
//! point each role maps to is supplied at construction through
//! [`MonitoredSet`], so the evaluator never hard-codes addresses and can be
//! exercised against synthetic bindings in tests.

use level_model::PointId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The seven monitored roles, in batch order
///
/// | Role | Type | Effect on the balance |
/// |------|------|-----------------------|
/// | T1–T3 | digital | consumers, −1 each while active |
/// | T4 | digital | high-demand consumer, −3; shut off on a setpoint low alarm |
/// | K | analog | the regulated setpoint |
/// | I1 | digital | primary inflow, +2 while active |
/// | I2 | digital | secondary inflow, +3 while active |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    T1,
    T2,
    T3,
    T4,
    K,
    I1,
    I2,
}

impl Role {
    /// All roles in the fixed batch order
    pub const ALL: [Role; 7] = [
        Role::T1,
        Role::T2,
        Role::T3,
        Role::T4,
        Role::K,
        Role::I1,
        Role::I2,
    ];

    /// Number of monitored roles
    pub const COUNT: usize = Self::ALL.len();

    /// Position of this role within the batch order
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Fixed role → point binding for the lifetime of the loop
///
/// Configured once; the driver requests snapshots for `identifiers()` each
/// cycle and the batch decoder verifies the returned ids against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitoredSet {
    points: [PointId; Role::COUNT],
}

impl MonitoredSet {
    /// Bind each role to a concrete point, in role order (T1..T4, K, I1, I2)
    pub fn new(points: [PointId; Role::COUNT]) -> Self {
        Self { points }
    }

    /// Point bound to the given role
    pub fn point(&self, role: Role) -> PointId {
        self.points[role.index()]
    }

    /// All bound points in batch order, for the per-cycle snapshot request
    pub fn identifiers(&self) -> &[PointId; Role::COUNT] {
        &self.points
    }
}

impl Default for MonitoredSet {
    /// The classic unit layout: consumers at 1000–1003, setpoint at 2000,
    /// inflows at 3000/3001
    fn default() -> Self {
        Self::new([
            PointId::digital(1000),
            PointId::digital(1001),
            PointId::digital(1002),
            PointId::digital(1003),
            PointId::analog(2000),
            PointId::digital(3000),
            PointId::digital(3001),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_order_matches_index() {
        for (i, role) in Role::ALL.iter().enumerate() {
            assert_eq!(role.index(), i);
        }
        assert_eq!(Role::COUNT, 7);
    }

    #[test]
    fn test_default_binding() {
        let set = MonitoredSet::default();
        assert_eq!(set.point(Role::T1), PointId::digital(1000));
        assert_eq!(set.point(Role::T4), PointId::digital(1003));
        assert_eq!(set.point(Role::K), PointId::analog(2000));
        assert_eq!(set.point(Role::I1), PointId::digital(3000));
        assert_eq!(set.point(Role::I2), PointId::digital(3001));
    }

    #[test]
    fn test_identifiers_follow_role_order() {
        let set = MonitoredSet::default();
        let ids = set.identifiers();
        for role in Role::ALL {
            assert_eq!(ids[role.index()], set.point(role));
        }
    }

    #[test]
    fn test_synthetic_binding() {
        let set = MonitoredSet::new([
            PointId::digital(1),
            PointId::digital(2),
            PointId::digital(3),
            PointId::digital(4),
            PointId::analog(5),
            PointId::digital(6),
            PointId::digital(7),
        ]);
        assert_eq!(set.point(Role::K), PointId::analog(5));
        assert_eq!(set.point(Role::I2), PointId::digital(7));
    }
}
