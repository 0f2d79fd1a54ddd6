//! Control Loop Driver - periodic cycle execution
//!
//! Owns the single automation task: each cycle takes one snapshot batch,
//! runs the control evaluator, dispatches the resulting writes in order, and
//! waits before repeating. A faulted cycle (snapshot unavailable, dispatch
//! failure) is logged and skipped; only `stop()` ends the loop.

use crate::error::{AutosrvError, Result};
use crate::traits::{CommandDispatcher, PointSource};
use level_control::{evaluate, MonitoredSet, SnapshotBatch};
use std::sync::atomic::{AtomicBool, AtomicU16, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Fixed inter-cycle wait.
///
/// Deliberately distinct from the poll interval passed to `start()`: the
/// configured interval is stored and exposed, the loop itself always waits
/// this duration between cycles.
pub const CYCLE_WAIT: Duration = Duration::from_millis(1000);

/// Control Loop Driver - runs the read/evaluate/dispatch cycle
pub struct ControlLoopDriver {
    /// Snapshot source
    source: Arc<dyn PointSource>,
    /// Write-command executor
    dispatcher: Arc<dyn CommandDispatcher>,
    /// Fixed role → point binding
    monitored: MonitoredSet,
    /// Unit address tagged onto every write
    unit_address: u8,
    /// Stored poll interval from the last start() call, in seconds
    poll_interval: AtomicU64,
    /// Transaction id counter (fresh id per dispatched write)
    next_transaction: AtomicU16,
    /// Shutdown signal
    shutdown: tokio::sync::Notify,
    /// Running state
    running: AtomicBool,
}

impl ControlLoopDriver {
    /// Create a new driver over the external seams
    pub fn new(
        source: Arc<dyn PointSource>,
        dispatcher: Arc<dyn CommandDispatcher>,
        monitored: MonitoredSet,
        unit_address: u8,
    ) -> Self {
        Self {
            source,
            dispatcher,
            monitored,
            unit_address,
            poll_interval: AtomicU64::new(0),
            next_transaction: AtomicU16::new(1),
            shutdown: tokio::sync::Notify::new(),
            running: AtomicBool::new(false),
        }
    }

    /// Run the loop until `stop()` is called
    ///
    /// Records `poll_interval_seconds` and begins cycling. The stop signal
    /// is honored at cycle boundaries; a pending wait is not preempted, so
    /// shutdown latency is bounded by one wait plus one evaluation.
    pub async fn start(&self, poll_interval_seconds: u64) {
        if self.running.swap(true, Ordering::Relaxed) {
            warn!("Control loop already running");
            return;
        }

        self.poll_interval
            .store(poll_interval_seconds, Ordering::Relaxed);
        info!(
            poll_interval_seconds,
            cycle_wait_ms = CYCLE_WAIT.as_millis() as u64,
            "Starting control loop"
        );

        let mut tick = interval(CYCLE_WAIT);
        // A slow cycle delays the next tick instead of bursting
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    if let Err(e) = self.cycle().await {
                        warn!("Cycle skipped: {}", e);
                    }
                }
                _ = self.shutdown.notified() => {
                    info!("Control loop received shutdown signal");
                    break;
                }
            }
        }

        self.running.store(false, Ordering::Relaxed);
        info!("Control loop stopped");
    }

    /// Request termination; idempotent
    pub fn stop(&self) {
        self.shutdown.notify_one();
    }

    /// Check if the loop is running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Poll interval recorded by the last `start()` call, in seconds
    pub fn poll_interval(&self) -> u64 {
        self.poll_interval.load(Ordering::Relaxed)
    }

    /// One cycle: snapshot, evaluate, dispatch in order
    async fn cycle(&self) -> Result<()> {
        let points = self
            .source
            .read_points(self.monitored.identifiers())
            .await
            .map_err(|e| AutosrvError::StorageError(e.to_string()))?;
        let batch = SnapshotBatch::from_points(&self.monitored, points)?;

        let decisions = evaluate(&batch);
        if decisions.is_empty() {
            debug!("Cycle stable, no writes");
            return Ok(());
        }

        for decision in decisions {
            let transaction_id = self.next_transaction.fetch_add(1, Ordering::Relaxed);
            debug!(%decision, transaction = transaction_id, "Dispatching write");
            if let Err(e) = self
                .dispatcher
                .execute_write(
                    &decision.config,
                    transaction_id,
                    self.unit_address,
                    decision.point.address,
                    decision.value,
                )
                .await
            {
                // Fire-and-forget: no retry this cycle, the next poll
                // re-evaluates from a fresh snapshot.
                warn!("Write to {} failed: {}", decision.point, e);
            }
        }

        Ok(())
    }
}
