//! level-control - Control core for LevelEMS
//!
//! The decision-making half of the automation loop:
//!
//! - **Roles and binding**: [`Role`], [`MonitoredSet`] - which points the
//!   loop regulates
//! - **Batch decoding**: [`SnapshotBatch`] - one verified snapshot per role
//! - **Evaluation**: [`evaluate`] - the pure per-cycle decision function
//!   emitting ordered [`WriteDecision`]s
//!
//! Timing, I/O, and lifecycle live in the service layer; this crate never
//! performs I/O and carries no state between cycles.

pub mod decision;
pub mod error;
pub mod evaluator;
pub mod roles;

pub use decision::WriteDecision;
pub use error::{ControlError, Result};
pub use evaluator::{evaluate, SnapshotBatch};
pub use roles::{MonitoredSet, Role};
