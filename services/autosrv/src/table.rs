//! In-memory point table
//!
//! DashMap-backed backend implementing both trait seams. Serves the tests
//! and the service's loopback simulation mode: dispatched writes land back
//! in the table, the alarm state is re-derived from the configured low
//! limit, and successive cycles converge the process.
//!
//! Addresses are unique within a unit, so the table is keyed by address.

use crate::traits::{CommandDispatcher, PointSource};
use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use dashmap::DashMap;
use level_model::{to_egu, AlarmState, PointConfig, PointId, PointSnapshot};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// One stored point
#[derive(Debug, Clone)]
struct StoredPoint {
    id: PointId,
    raw_value: u16,
    alarm: AlarmState,
    config: PointConfig,
}

impl StoredPoint {
    /// Re-derive the alarm state from the current value and the low limit
    fn refresh_alarm(&mut self) {
        let egu = to_egu(self.config.scale_factor, self.config.deviation, self.raw_value);
        self.alarm = match self.config.low_limit {
            Some(limit) if egu < limit => AlarmState::LowAlarm,
            _ => AlarmState::None,
        };
    }
}

/// Table statistics (useful for asserting loop behavior in tests)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableStats {
    pub point_count: usize,
    pub reads: u64,
    pub writes: u64,
}

/// In-memory point table with concurrent access support
pub struct MemoryPointTable {
    points: DashMap<u16, StoredPoint>,
    reads: AtomicU64,
    writes: AtomicU64,
}

impl MemoryPointTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            points: DashMap::new(),
            reads: AtomicU64::new(0),
            writes: AtomicU64::new(0),
        }
    }

    /// Install a point with an initial raw value; the alarm state is derived
    /// from the value immediately
    pub fn seed(&self, id: PointId, raw_value: u16, config: PointConfig) {
        let mut stored = StoredPoint {
            id,
            raw_value,
            alarm: AlarmState::None,
            config,
        };
        stored.refresh_alarm();
        self.points.insert(id.address, stored);
    }

    /// Current raw value of a point
    pub fn raw_value(&self, id: PointId) -> Option<u16> {
        self.points.get(&id.address).map(|p| p.raw_value)
    }

    /// Current alarm state of a point
    pub fn alarm(&self, id: PointId) -> Option<AlarmState> {
        self.points.get(&id.address).map(|p| p.alarm)
    }

    /// Overwrite a raw value directly (external process change, not a
    /// dispatched command)
    pub fn set_raw_value(&self, id: PointId, raw_value: u16) {
        if let Some(mut stored) = self.points.get_mut(&id.address) {
            stored.raw_value = raw_value;
            stored.refresh_alarm();
        }
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) {
        self.points.clear();
    }

    /// Read and write counts alongside the point count
    pub fn stats(&self) -> TableStats {
        TableStats {
            point_count: self.points.len(),
            reads: self.reads.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
        }
    }
}

impl Default for MemoryPointTable {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PointSource for MemoryPointTable {
    async fn read_points(&self, ids: &[PointId]) -> Result<Vec<PointSnapshot>> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        ids.iter()
            .map(|id| {
                let stored = self
                    .points
                    .get(&id.address)
                    .ok_or_else(|| anyhow!("point {} not found", id))?;
                if stored.id != *id {
                    bail!("point {} stored under mismatched id {}", id, stored.id);
                }
                Ok(PointSnapshot {
                    id: stored.id,
                    raw_value: stored.raw_value,
                    alarm: stored.alarm,
                    config: stored.config.clone(),
                })
            })
            .collect()
    }
}

#[async_trait]
impl CommandDispatcher for MemoryPointTable {
    async fn execute_write(
        &self,
        _config: &PointConfig,
        transaction_id: u16,
        unit_address: u8,
        point_address: u16,
        value: i64,
    ) -> Result<()> {
        let mut stored = self
            .points
            .get_mut(&point_address)
            .ok_or_else(|| anyhow!("write to unknown point address {}", point_address))?;
        // Negative values cannot occur for in-range commands; clamp anyway
        stored.raw_value = value.clamp(0, i64::from(u16::MAX)) as u16;
        stored.refresh_alarm();
        self.writes.fetch_add(1, Ordering::Relaxed);
        debug!(
            transaction = transaction_id,
            unit = unit_address,
            point = %stored.id,
            value,
            "write applied"
        );
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;

    fn k_config() -> PointConfig {
        PointConfig::analog(1.0, 0.0, 15.0).with_low_limit(3.0)
    }

    #[tokio::test]
    async fn test_read_preserves_request_order() {
        let table = MemoryPointTable::new();
        let a = PointId::digital(1000);
        let b = PointId::analog(2000);
        table.seed(b, 10, k_config());
        table.seed(a, 1, PointConfig::discrete());

        let snaps = table.read_points(&[a, b]).await.unwrap();
        assert_eq!(snaps.len(), 2);
        assert_eq!(snaps[0].id, a);
        assert_eq!(snaps[1].id, b);
    }

    #[tokio::test]
    async fn test_missing_point_fails_the_batch() {
        let table = MemoryPointTable::new();
        table.seed(PointId::digital(1000), 0, PointConfig::discrete());
        let result = table
            .read_points(&[PointId::digital(1000), PointId::digital(9999)])
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_write_rederives_low_alarm() {
        let table = MemoryPointTable::new();
        let k = PointId::analog(2000);
        table.seed(k, 10, k_config());
        assert_eq!(table.alarm(k), Some(AlarmState::None));

        // Below the low limit
        let cfg = k_config();
        table.execute_write(&cfg, 1, 1, 2000, 2).await.unwrap();
        assert_eq!(table.raw_value(k), Some(2));
        assert_eq!(table.alarm(k), Some(AlarmState::LowAlarm));

        // Back above it
        table.execute_write(&cfg, 2, 1, 2000, 8).await.unwrap();
        assert_eq!(table.alarm(k), Some(AlarmState::None));
    }

    #[tokio::test]
    async fn test_stats_count_reads_and_writes() {
        let table = MemoryPointTable::new();
        let id = PointId::digital(3000);
        table.seed(id, 0, PointConfig::discrete());
        table.read_points(&[id]).await.unwrap();
        table
            .execute_write(&PointConfig::discrete(), 1, 1, 3000, 1)
            .await
            .unwrap();
        let stats = table.stats();
        assert_eq!(stats.point_count, 1);
        assert_eq!(stats.reads, 1);
        assert_eq!(stats.writes, 1);
    }
}
