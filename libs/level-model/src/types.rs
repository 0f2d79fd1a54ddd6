//! Core point types for LevelEMS
//!
//! This module contains the fundamental identifiers used across the system.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Point Types
// ============================================================================

/// Output point types addressable by the automation layer
///
/// Only output points participate in regulation: discrete outputs carry the
/// consumer/interlock states, analog outputs carry the regulated setpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PointType {
    /// D - Digital output - discrete 0/1 states (consumers, interlocks)
    #[serde(rename = "D", alias = "digital", alias = "digital_output")]
    DigitalOutput,

    /// A - Analog output - scaled engineering values (setpoints)
    #[serde(rename = "A", alias = "analog", alias = "analog_output")]
    AnalogOutput,
}

impl PointType {
    /// Convert to the short code used in keys and logs
    ///
    /// # Examples
    /// ```
    /// # use level_model::PointType;
    /// assert_eq!(PointType::DigitalOutput.as_str(), "D");
    /// assert_eq!(PointType::AnalogOutput.as_str(), "A");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            PointType::DigitalOutput => "D",
            PointType::AnalogOutput => "A",
        }
    }

    /// Check if this is a discrete 0/1 type
    pub fn is_digital(&self) -> bool {
        matches!(self, PointType::DigitalOutput)
    }

    /// Check if this is a scaled analog type
    pub fn is_analog(&self) -> bool {
        matches!(self, PointType::AnalogOutput)
    }
}

impl fmt::Display for PointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PointType {
    type Err = String;

    /// Parse PointType from string (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "D" | "d" | "digital" | "DIGITAL" | "digital_output" => Ok(PointType::DigitalOutput),
            "A" | "a" | "analog" | "ANALOG" | "analog_output" => Ok(PointType::AnalogOutput),
            _ => Err(format!(
                "Invalid PointType: '{}'. Valid values: D/digital, A/analog",
                s
            )),
        }
    }
}

// ============================================================================
// Point Identifier
// ============================================================================

/// Immutable point identifier: type plus register address
///
/// Used as the lookup key when requesting snapshots and when issuing writes.
///
/// # Examples
/// ```
/// # use level_model::{PointId, PointType};
/// let id = PointId::digital(1003);
/// assert_eq!(id.point_type, PointType::DigitalOutput);
/// assert_eq!(id.to_string(), "D:1003");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointId {
    /// Point type (digital or analog output)
    pub point_type: PointType,
    /// Register address within the unit
    pub address: u16,
}

impl PointId {
    /// Create a new point identifier
    pub fn new(point_type: PointType, address: u16) -> Self {
        Self {
            point_type,
            address,
        }
    }

    /// Shorthand for a digital output identifier
    pub fn digital(address: u16) -> Self {
        Self::new(PointType::DigitalOutput, address)
    }

    /// Shorthand for an analog output identifier
    pub fn analog(address: u16) -> Self {
        Self::new(PointType::AnalogOutput, address)
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.point_type, self.address)
    }
}

// ============================================================================
// Alarm State
// ============================================================================

/// Alarm state reported by point storage alongside the raw value
///
/// The control core only reacts to `LowAlarm` on the setpoint; the remaining
/// variants are carried so snapshots reflect the full storage state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlarmState {
    /// No alarm active
    #[default]
    #[serde(rename = "none")]
    None,
    /// Value below the configured low limit
    #[serde(rename = "low")]
    LowAlarm,
    /// Value above the configured high limit
    #[serde(rename = "high")]
    HighAlarm,
}

impl AlarmState {
    /// Check if this is the low alarm consumed by the safety interlock step
    pub fn is_low(&self) -> bool {
        matches!(self, AlarmState::LowAlarm)
    }
}

impl fmt::Display for AlarmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AlarmState::None => "none",
            AlarmState::LowAlarm => "low",
            AlarmState::HighAlarm => "high",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;

    #[test]
    fn test_point_type_as_str() {
        assert_eq!(PointType::DigitalOutput.as_str(), "D");
        assert_eq!(PointType::AnalogOutput.as_str(), "A");
    }

    #[test]
    fn test_point_type_parse() {
        assert_eq!(
            "D".parse::<PointType>().unwrap(),
            PointType::DigitalOutput
        );
        assert_eq!("analog".parse::<PointType>().unwrap(), PointType::AnalogOutput);
        assert!("X".parse::<PointType>().is_err());
    }

    #[test]
    fn test_point_type_categories() {
        assert!(PointType::DigitalOutput.is_digital());
        assert!(!PointType::DigitalOutput.is_analog());
        assert!(PointType::AnalogOutput.is_analog());
        assert!(!PointType::AnalogOutput.is_digital());
    }

    #[test]
    fn test_point_id_display() {
        assert_eq!(PointId::digital(1000).to_string(), "D:1000");
        assert_eq!(PointId::analog(2000).to_string(), "A:2000");
    }

    #[test]
    fn test_point_id_key_semantics() {
        // Same address, different type must not collide
        assert_ne!(PointId::digital(2000), PointId::analog(2000));
        assert_eq!(PointId::digital(1000), PointId::new(PointType::DigitalOutput, 1000));
    }

    #[test]
    fn test_alarm_state() {
        assert!(AlarmState::LowAlarm.is_low());
        assert!(!AlarmState::HighAlarm.is_low());
        assert!(!AlarmState::None.is_low());
        assert_eq!(AlarmState::default(), AlarmState::None);
    }

    #[test]
    fn test_point_type_serde() {
        assert_eq!(
            serde_json::to_string(&PointType::DigitalOutput).unwrap(),
            "\"D\""
        );
        assert_eq!(
            serde_json::from_str::<PointType>("\"digital\"").unwrap(),
            PointType::DigitalOutput
        );
        assert_eq!(
            serde_json::from_str::<AlarmState>("\"low\"").unwrap(),
            AlarmState::LowAlarm
        );
    }
}
