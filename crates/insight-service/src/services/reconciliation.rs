//! Reconciliation service
//!
//! Recomputes insight aggregates from the reaction records and corrects any
//! that drifted. Each insight is checked in its own unit of work with the
//! aggregate row locked, so a concurrent toggle either lands before the
//! recount or waits for the correction.

use tracing::{info, instrument, warn};

use insight_core::entities::InsightAggregate;
use insight_core::value_objects::InsightId;
use insight_core::DomainError;

use crate::dto::ReconcileRequest;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Batch size used when a request does not name one
pub const DEFAULT_RECONCILE_BATCH: u32 = 200;

/// Outcome of one reconciliation batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Insights examined
    pub scanned: usize,
    /// Insights whose aggregate was rewritten
    pub corrected: usize,
    /// Last insight examined when the batch was full; `None` at the end
    pub next_cursor: Option<InsightId>,
}

/// Reconciliation service
pub struct ReconciliationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReconciliationService<'a> {
    /// Create a new ReconciliationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Run one batch from a validated request body
    pub async fn reconcile(&self, request: &ReconcileRequest) -> ServiceResult<ReconcileReport> {
        self.reconcile_batch(
            request.after_cursor.map(InsightId::new),
            request.batch_size.unwrap_or(DEFAULT_RECONCILE_BATCH),
        )
        .await
    }

    /// Check up to `batch_size` insights with ids after `after`, in id order
    #[instrument(skip(self))]
    pub async fn reconcile_batch(
        &self,
        after: Option<InsightId>,
        batch_size: u32,
    ) -> ServiceResult<ReconcileReport> {
        let batch_size = batch_size.max(1);
        let ids = self
            .ctx
            .bounded(async {
                Ok::<_, ServiceError>(
                    self.ctx
                        .insight_repo()
                        .list_ids(after, i64::from(batch_size))
                        .await?,
                )
            })
            .await?;

        let mut report = ReconcileReport {
            scanned: ids.len(),
            ..ReconcileReport::default()
        };

        for &insight_id in &ids {
            if self.ctx.bounded(self.reconcile_one(insight_id)).await? {
                report.corrected += 1;
            }
        }

        let full = ids.len() >= usize::try_from(batch_size).unwrap_or(usize::MAX);
        report.next_cursor = if full { ids.last().copied() } else { None };

        info!(
            scanned = report.scanned,
            corrected = report.corrected,
            "Reconciliation batch finished"
        );

        Ok(report)
    }

    /// Returns whether the aggregate needed correcting
    async fn reconcile_one(&self, insight_id: InsightId) -> ServiceResult<bool> {
        let mut uow = self.ctx.reaction_repo().begin().await?;

        // Deleted since the id listing
        let Some(stored) = uow.lock_aggregate(insight_id).await? else {
            return Ok(false);
        };

        let counts = uow.count_reactions(insight_id).await?;
        let actual = InsightAggregate::from_counts(insight_id, counts);
        if stored == actual {
            return Ok(false);
        }

        warn!(
            insight_id = %insight_id,
            stored_total = stored.total,
            actual_total = actual.total,
            stored_counts = ?stored.counts,
            actual_counts = ?actual.counts,
            "Reaction aggregate drifted; correcting"
        );

        uow.overwrite_aggregate(&actual).await?;
        uow.commit().await?;
        Ok(true)
    }

    /// Recount a single insight, reporting drift as an error instead of fixing it
    pub async fn verify(&self, insight_id: InsightId) -> ServiceResult<InsightAggregate> {
        self.ctx.bounded(self.verify_one(insight_id)).await
    }

    async fn verify_one(&self, insight_id: InsightId) -> ServiceResult<InsightAggregate> {
        let mut uow = self.ctx.reaction_repo().begin().await?;
        let stored = uow
            .lock_aggregate(insight_id)
            .await?
            .ok_or(DomainError::InsightNotFound(insight_id))?;
        let counts = uow.count_reactions(insight_id).await?;

        if InsightAggregate::from_counts(insight_id, counts) != stored {
            return Err(DomainError::AggregateDrift(insight_id).into());
        }
        Ok(stored)
    }
}
