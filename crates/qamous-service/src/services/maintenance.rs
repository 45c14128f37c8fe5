//! Maintenance service
//!
//! Administrative passes over the whole reaction store: recalculating the
//! denormalized counters from the ledger and wiping all reactions.

use qamous_common::Environment;
use qamous_core::entities::ReactionTally;
use qamous_core::traits::ReactionTransaction;
use qamous_core::DefinitionId;
use tracing::{error, info, instrument, warn};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Result of a recalculation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecalculationReport {
    /// Counts written, in definition id order
    pub definitions: Vec<ReactionTally>,
    /// Batches that failed and were skipped
    pub failed_batches: usize,
}

impl RecalculationReport {
    pub fn is_complete(&self) -> bool {
        self.failed_batches == 0
    }
}

/// Maintenance service
pub struct MaintenanceService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MaintenanceService<'a> {
    /// Create a new MaintenanceService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Overwrite every definition's counters with ledger-derived values
    ///
    /// Definitions are processed in id order, `batch_size` at a time, each batch
    /// in its own transaction. A failed batch is rolled back, logged, and skipped.
    #[instrument(skip(self))]
    pub async fn recalculate_all(&self, batch_size: i64) -> ServiceResult<RecalculationReport> {
        if batch_size <= 0 {
            return Err(ServiceError::validation("batch_size must be positive"));
        }

        let mut report = RecalculationReport::default();
        let mut cursor: Option<DefinitionId> = None;

        loop {
            let ids = self
                .ctx
                .definition_repo()
                .find_ids_after(cursor, batch_size)
                .await?;
            let Some(&last) = ids.last() else {
                break;
            };

            match self.recalculate_batch(&ids).await {
                Ok(tallies) => report.definitions.extend(tallies),
                Err(e) => {
                    error!(
                        first_definition_id = %ids[0],
                        last_definition_id = %last,
                        error = %e,
                        "Recalculation batch failed"
                    );
                    report.failed_batches += 1;
                }
            }

            if (ids.len() as i64) < batch_size {
                break;
            }
            cursor = Some(last);
        }

        info!(
            definitions = report.definitions.len(),
            failed_batches = report.failed_batches,
            "Reaction counts recalculated"
        );
        Ok(report)
    }

    async fn recalculate_batch(&self, ids: &[DefinitionId]) -> ServiceResult<Vec<ReactionTally>> {
        let mut tx = self.ctx.reaction_repo().begin().await?;

        match overwrite_batch(tx.as_mut(), ids).await {
            Ok(tallies) => {
                tx.commit().await?;
                Ok(tallies)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "Rollback failed");
                }
                Err(e)
            }
        }
    }

    /// Delete every reaction and zero all counters and points
    ///
    /// Refused in production. Returns the number of reactions deleted.
    #[instrument(skip(self))]
    pub async fn reset_all(&self, environment: Environment) -> ServiceResult<u64> {
        if environment.is_production() {
            warn!("Refusing to reset reactions in production");
            return Err(ServiceError::validation(
                "resetting reactions is disabled in production",
            ));
        }

        let mut tx = self.ctx.reaction_repo().begin().await?;
        let deleted = match tx.clear_all().await {
            Ok(deleted) => deleted,
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "Rollback failed");
                }
                return Err(e.into());
            }
        };
        tx.commit().await?;

        info!(reactions_deleted = deleted, environment = %environment, "Reactions reset");
        Ok(deleted)
    }
}

async fn overwrite_batch(
    tx: &mut dyn ReactionTransaction,
    ids: &[DefinitionId],
) -> ServiceResult<Vec<ReactionTally>> {
    let tallies = tx.tally(ids).await?;
    for tally in &tallies {
        tx.overwrite_counts(tally).await?;
    }
    Ok(tallies)
}
