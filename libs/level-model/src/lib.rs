//! level-model - Point model library for LevelEMS
//!
//! Fundamental types shared by the control core and the automation service:
//!
//! - **Point identity**: [`PointType`], [`PointId`]
//! - **Point state**: [`AlarmState`], [`PointConfig`], [`PointSnapshot`]
//! - **EGU conversion**: linear scale/offset transform and saturating
//!   conversion into the integral level domain ([`egu`])
//!
//! This crate is pure data: no async, no I/O, no side effects.

pub mod egu;
pub mod point;
pub mod types;

pub use egu::{clamp_level, egu_to_level, to_egu};
pub use point::{PointConfig, PointSnapshot};
pub use types::{AlarmState, PointId, PointType};
