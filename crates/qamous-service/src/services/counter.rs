//! Counter maintenance
//!
//! Keeps `like_count` / `dislike_count` in step with the ledger inside the
//! caller's transaction.

use qamous_core::traits::ReactionTransaction;
use qamous_core::{CountColumn, CountDelta, DefinitionId, DomainError, Transition};
use tracing::warn;

use super::error::ServiceResult;

/// Applies guarded counter updates through a reaction transaction
pub struct CounterMaintainer;

impl CounterMaintainer {
    /// Apply one unit change to a counter
    ///
    /// A rejected decrement is a `CounterUnderflow`: the counter had already drifted
    /// from the ledger, so the whole transaction must abort.
    pub async fn adjust(
        tx: &mut dyn ReactionTransaction,
        definition_id: DefinitionId,
        column: CountColumn,
        delta: CountDelta,
    ) -> ServiceResult<()> {
        if tx.adjust_count(definition_id, column, delta).await? {
            return Ok(());
        }

        match delta {
            CountDelta::Decrement => {
                warn!(
                    definition_id = %definition_id,
                    column = %column,
                    "Refusing to decrement reaction count below 0"
                );
                Err(DomainError::CounterUnderflow {
                    definition_id,
                    column,
                }
                .into())
            }
            CountDelta::Increment => Err(DomainError::DefinitionNotFound(definition_id).into()),
        }
    }

    /// Apply every counter change a transition implies, decrements first
    pub async fn apply(
        tx: &mut dyn ReactionTransaction,
        definition_id: DefinitionId,
        transition: Transition,
    ) -> ServiceResult<()> {
        for (column, delta) in transition.count_adjustments() {
            Self::adjust(tx, definition_id, column, delta).await?;
        }
        Ok(())
    }
}
