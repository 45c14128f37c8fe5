//! Author points ledger

use qamous_core::traits::ReactionTransaction;
use qamous_core::{Transition, UserId};
use tracing::debug;

use super::error::ServiceResult;

/// Routes reaction-driven points to definition authors
pub struct PointsLedger;

impl PointsLedger {
    /// Apply the points a transition earns the author
    ///
    /// Reactions on one's own definition never move points, validated or not.
    /// Returns the delta actually applied.
    pub async fn apply(
        tx: &mut dyn ReactionTransaction,
        author_id: UserId,
        actor_id: UserId,
        transition: Transition,
    ) -> ServiceResult<i64> {
        if author_id == actor_id {
            debug!(user_id = %actor_id, "Skipping points for self-reaction");
            return Ok(0);
        }

        let delta = transition.points_delta();
        tx.increment_points(author_id, delta).await?;
        Ok(delta)
    }
}
