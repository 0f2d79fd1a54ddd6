//! Trait seams for the external collaborators of the control loop
//!
//! The point storage and the command executor are owned outside the loop and
//! only need to be safe for sequential access from the single driver task.
//! Implementations: [`crate::table::MemoryPointTable`] for tests and the
//! loopback simulation; a protocol-backed implementation lives behind the
//! same seams in a full deployment.

use anyhow::Result;
use async_trait::async_trait;
use level_model::{PointConfig, PointId, PointSnapshot};

/// Current-value snapshot source
#[async_trait]
pub trait PointSource: Send + Sync {
    /// Read one snapshot per requested identifier, preserving caller order
    ///
    /// Must fail (rather than return a partial batch) if any requested point
    /// is unknown; the driver skips the cycle and retries on the next one.
    async fn read_points(&self, ids: &[PointId]) -> Result<Vec<PointSnapshot>>;
}

/// Write-command executor
#[async_trait]
pub trait CommandDispatcher: Send + Sync {
    /// Execute one write command against the process
    ///
    /// Fire-and-forget from the driver's perspective: the result is logged,
    /// never retried within the cycle. `config` is the opaque per-point
    /// handle carried through from the snapshot.
    async fn execute_write(
        &self,
        config: &PointConfig,
        transaction_id: u16,
        unit_address: u8,
        point_address: u16,
        value: i64,
    ) -> Result<()>;
}
