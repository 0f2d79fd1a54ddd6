//! Service configuration
//!
//! Defaults reproduce the classic unit layout; a YAML file and `AUTOSRV_`
//! environment variables override them (file beats defaults, env beats file).

use crate::error::Result;
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use level_control::{MonitoredSet, Role};
use level_model::{PointConfig, PointId, PointType};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Service configuration
    #[serde(default)]
    pub service: ServiceConfig,

    /// Automation loop configuration
    #[serde(default)]
    pub automation: AutomationConfig,

    /// Role → point binding with per-point configuration
    #[serde(default)]
    pub points: PointsConfig,
}

/// Service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service name
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Automation loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutomationConfig {
    /// Poll interval handed to the driver's start operation, in seconds.
    /// Stored by the driver; the inter-cycle wait itself is fixed (see
    /// `driver::CYCLE_WAIT`).
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: u64,

    /// Unit address tagged onto every dispatched write
    #[serde(default = "default_unit_address")]
    pub unit_address: u8,
}

/// One configured point: binding plus static per-point configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointEntry {
    /// Point type (digital or analog output)
    pub point_type: PointType,

    /// Register address within the unit
    pub address: u16,

    /// Linear scale factor
    #[serde(default = "default_scale_factor")]
    pub scale_factor: f64,

    /// Linear offset
    #[serde(default)]
    pub deviation: f64,

    /// Maximum allowed engineering-unit value
    #[serde(default = "default_egu_max")]
    pub egu_max: f64,

    /// Low-alarm threshold in engineering units
    #[serde(default)]
    pub low_limit: Option<f64>,

    /// Initial raw value seeded into the in-memory table
    #[serde(default)]
    pub initial_raw: u16,
}

impl PointEntry {
    fn digital(address: u16) -> Self {
        Self {
            point_type: PointType::DigitalOutput,
            address,
            scale_factor: default_scale_factor(),
            deviation: 0.0,
            egu_max: 1.0,
            low_limit: None,
            initial_raw: 0,
        }
    }

    /// Point identifier for this entry
    pub fn id(&self) -> PointId {
        PointId::new(self.point_type, self.address)
    }

    /// Static point configuration for this entry
    pub fn point_config(&self) -> PointConfig {
        PointConfig {
            scale_factor: self.scale_factor,
            deviation: self.deviation,
            egu_max: self.egu_max,
            low_limit: self.low_limit,
        }
    }
}

/// The seven monitored roles and their bound points
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointsConfig {
    pub t1: PointEntry,
    pub t2: PointEntry,
    pub t3: PointEntry,
    pub t4: PointEntry,
    pub k: PointEntry,
    pub i1: PointEntry,
    pub i2: PointEntry,
}

impl PointsConfig {
    /// Entry for the given role
    pub fn entry(&self, role: Role) -> &PointEntry {
        match role {
            Role::T1 => &self.t1,
            Role::T2 => &self.t2,
            Role::T3 => &self.t3,
            Role::T4 => &self.t4,
            Role::K => &self.k,
            Role::I1 => &self.i1,
            Role::I2 => &self.i2,
        }
    }

    /// Build the fixed role → point binding for the driver
    pub fn monitored_set(&self) -> MonitoredSet {
        MonitoredSet::new([
            self.t1.id(),
            self.t2.id(),
            self.t3.id(),
            self.t4.id(),
            self.k.id(),
            self.i1.id(),
            self.i2.id(),
        ])
    }
}

impl Config {
    /// Load configuration: defaults, then an optional YAML file, then
    /// `AUTOSRV_` environment overrides (`AUTOSRV_AUTOMATION__UNIT_ADDRESS=2`)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        let config: Config = figment
            .merge(Env::prefixed("AUTOSRV_").split("__"))
            .extract()?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            service: ServiceConfig::default(),
            automation: AutomationConfig::default(),
            points: PointsConfig::default(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            name: default_service_name(),
            log_level: default_log_level(),
        }
    }
}

impl Default for AutomationConfig {
    fn default() -> Self {
        AutomationConfig {
            poll_interval_seconds: default_poll_interval(),
            unit_address: default_unit_address(),
        }
    }
}

impl Default for PointsConfig {
    /// Classic binding: consumers at 1000–1003, setpoint at 2000 with a
    /// low-alarm limit, inflows at 3000/3001
    fn default() -> Self {
        PointsConfig {
            t1: PointEntry::digital(1000),
            t2: PointEntry::digital(1001),
            t3: PointEntry::digital(1002),
            t4: PointEntry::digital(1003),
            k: PointEntry {
                point_type: PointType::AnalogOutput,
                address: 2000,
                scale_factor: 1.0,
                deviation: 0.0,
                egu_max: 15.0,
                low_limit: Some(3.0),
                initial_raw: 10,
            },
            i1: PointEntry::digital(3000),
            i2: PointEntry::digital(3001),
        }
    }
}

// Default value functions
fn default_service_name() -> String {
    "autosrv".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_poll_interval() -> u64 {
    1
}

fn default_unit_address() -> u8 {
    1
}

fn default_scale_factor() -> f64 {
    1.0
}

fn default_egu_max() -> f64 {
    15.0
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;

    #[test]
    fn test_default_binding_matches_classic_layout() {
        let config = Config::default();
        let set = config.points.monitored_set();
        assert_eq!(set.point(Role::T1), PointId::digital(1000));
        assert_eq!(set.point(Role::K), PointId::analog(2000));
        assert_eq!(set.point(Role::I2), PointId::digital(3001));
    }

    #[test]
    fn test_entry_lookup_covers_all_roles() {
        let config = Config::default();
        for role in Role::ALL {
            let entry = config.points.entry(role);
            assert_eq!(entry.id(), config.points.monitored_set().point(role));
        }
    }

    #[test]
    fn test_point_config_carries_limits() {
        let config = Config::default();
        let k = config.points.k.point_config();
        assert_eq!(k.egu_max, 15.0);
        assert_eq!(k.low_limit, Some(3.0));
    }
}
