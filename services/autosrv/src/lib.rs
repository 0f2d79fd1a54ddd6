//! autosrv - Automation service for LevelEMS
//!
//! Periodic control loop regulating the tank level process: one dedicated
//! task reads the monitored points, evaluates the control core, and
//! dispatches the resulting write commands each cycle.
//!
//! - [`config`] - service configuration and the role → point binding
//! - [`traits`] - seams for the external point source and command executor
//! - [`table`] - in-memory point table (tests and loopback simulation)
//! - [`driver`] - the cycle loop with start/stop lifecycle

pub mod config;
pub mod driver;
pub mod error;
pub mod table;
pub mod traits;

pub use config::Config;
pub use driver::{ControlLoopDriver, CYCLE_WAIT};
pub use error::{AutosrvError, Result};
pub use table::MemoryPointTable;
pub use traits::{CommandDispatcher, PointSource};
