//! Periodic aggregate reconciliation
//!
//! Walks every insight batch by batch on a fixed interval. Each tick runs a
//! full sweep from the first id; a failed batch ends the sweep early and the
//! next tick resumes from the failed batch.

use std::sync::Arc;

use insight_common::ReconcileConfig;
use insight_core::value_objects::InsightId;
use insight_service::{ReconciliationService, ServiceContext, ServiceResult};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, instrument};

/// Totals for one pass over the table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepSummary {
    pub batches: usize,
    pub scanned: usize,
    pub corrected: usize,
}

/// Cursor-holding driver over [`ReconciliationService`]
pub struct Reconciler {
    ctx: Arc<ServiceContext>,
    batch_size: u32,
    cursor: Option<InsightId>,
}

impl Reconciler {
    pub fn new(ctx: Arc<ServiceContext>, batch_size: u32) -> Self {
        Self {
            ctx,
            batch_size: batch_size.max(1),
            cursor: None,
        }
    }

    /// Where the next batch starts; `None` is the beginning of the table
    pub fn cursor(&self) -> Option<InsightId> {
        self.cursor
    }

    /// Run batches until the cursor wraps back to the start
    #[instrument(skip(self), fields(batch_size = self.batch_size))]
    pub async fn sweep(&mut self) -> ServiceResult<SweepSummary> {
        let service = ReconciliationService::new(&self.ctx);
        let mut summary = SweepSummary::default();

        loop {
            let report = service.reconcile_batch(self.cursor, self.batch_size).await?;
            summary.batches += 1;
            summary.scanned += report.scanned;
            summary.corrected += report.corrected;
            self.cursor = report.next_cursor;

            if self.cursor.is_none() {
                break;
            }
        }

        info!(
            batches = summary.batches,
            scanned = summary.scanned,
            corrected = summary.corrected,
            "Reconciliation sweep finished"
        );
        Ok(summary)
    }
}

/// Start the background reconciler, or `None` when disabled by config
pub fn spawn_reconciler(ctx: Arc<ServiceContext>, config: &ReconcileConfig) -> Option<JoinHandle<()>> {
    if !config.is_enabled() {
        info!("Scheduled reconciliation disabled");
        return None;
    }

    let period = config.interval();
    let mut reconciler = Reconciler::new(ctx, config.batch_size);
    info!(
        interval_secs = period.as_secs(),
        batch_size = config.batch_size,
        "Scheduled reconciliation enabled"
    );

    Some(tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick fires immediately; wait a full period after startup
        interval.tick().await;

        loop {
            interval.tick().await;
            if let Err(e) = reconciler.sweep().await {
                error!(
                    error = %e,
                    cursor = ?reconciler.cursor(),
                    "Reconciliation sweep failed"
                );
            }
        }
    }))
}
