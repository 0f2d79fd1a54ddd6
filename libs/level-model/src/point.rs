//! Point configuration and snapshots

use crate::types::{AlarmState, PointId};
use serde::{Deserialize, Serialize};

/// Static per-point configuration
///
/// Carried inside every snapshot and handed back opaquely when a write is
/// issued against the point, so the dispatcher has the scaling context of the
/// target without a second lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointConfig {
    /// Linear scale factor applied to the raw value
    pub scale_factor: f64,
    /// Linear offset (deviation) added after scaling
    pub deviation: f64,
    /// Maximum allowed engineering-unit value
    pub egu_max: f64,
    /// Engineering-unit threshold below which storage reports a low alarm
    #[serde(default)]
    pub low_limit: Option<f64>,
}

impl PointConfig {
    /// Identity configuration for discrete points (raw value is the state)
    pub fn discrete() -> Self {
        Self {
            scale_factor: 1.0,
            deviation: 0.0,
            egu_max: 1.0,
            low_limit: None,
        }
    }

    /// Configuration for a scaled analog point
    pub fn analog(scale_factor: f64, deviation: f64, egu_max: f64) -> Self {
        Self {
            scale_factor,
            deviation,
            egu_max,
            low_limit: None,
        }
    }

    /// Set the low-alarm threshold
    pub fn with_low_limit(mut self, low_limit: f64) -> Self {
        self.low_limit = Some(low_limit);
        self
    }
}

/// One point's state as read in a cycle
///
/// Snapshots are ephemeral: one batch is taken per cycle and discarded after
/// evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointSnapshot {
    /// Identifier the snapshot was requested under
    pub id: PointId,
    /// Last-read raw register value
    pub raw_value: u16,
    /// Alarm state reported by storage
    pub alarm: AlarmState,
    /// Static configuration of the point
    pub config: PointConfig,
}

impl PointSnapshot {
    /// Create a snapshot with no alarm active
    pub fn new(id: PointId, raw_value: u16, config: PointConfig) -> Self {
        Self {
            id,
            raw_value,
            alarm: AlarmState::None,
            config,
        }
    }

    /// Set the alarm state
    pub fn with_alarm(mut self, alarm: AlarmState) -> Self {
        self.alarm = alarm;
        self
    }

    /// Read the raw value as a discrete 0/1 state (nonzero reads as active)
    pub fn discrete_state(&self) -> u8 {
        u8::from(self.raw_value != 0)
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;

    #[test]
    fn test_discrete_config_is_identity() {
        let cfg = PointConfig::discrete();
        assert_eq!(cfg.scale_factor, 1.0);
        assert_eq!(cfg.deviation, 0.0);
        assert_eq!(cfg.low_limit, None);
    }

    #[test]
    fn test_with_low_limit() {
        let cfg = PointConfig::analog(1.0, 0.0, 15.0).with_low_limit(3.0);
        assert_eq!(cfg.low_limit, Some(3.0));
    }

    #[test]
    fn test_discrete_state_normalizes_nonzero() {
        let id = PointId::digital(1000);
        let snap = PointSnapshot::new(id, 0, PointConfig::discrete());
        assert_eq!(snap.discrete_state(), 0);
        let snap = PointSnapshot::new(id, 1, PointConfig::discrete());
        assert_eq!(snap.discrete_state(), 1);
        // A stuck raw value still reads as active
        let snap = PointSnapshot::new(id, 255, PointConfig::discrete());
        assert_eq!(snap.discrete_state(), 1);
    }

    #[test]
    fn test_snapshot_defaults_to_no_alarm() {
        let snap = PointSnapshot::new(PointId::analog(2000), 10, PointConfig::analog(1.0, 0.0, 15.0));
        assert_eq!(snap.alarm, AlarmState::None);
        let snap = snap.with_alarm(AlarmState::LowAlarm);
        assert!(snap.alarm.is_low());
    }
}
