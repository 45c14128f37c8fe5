//! Reaction service
//!
//! Coordinates likes and dislikes on definitions. Every mutation runs as:
//! validate, open a transaction, re-read the caller's reaction inside it, then
//! write the ledger row, the definition counters, and the author's points
//! before committing. Any failure after the transaction opens rolls back all
//! three.

use qamous_core::entities::{NewReaction, Reaction, ReactionCounts};
use qamous_core::traits::ReactionTransaction;
use qamous_core::{
    DefinitionId, DomainError, ReactionAction, ReactionKind, ReactionState, Transition, UserId,
};
use tracing::{error, info, instrument, warn};

use super::context::ServiceContext;
use super::counter::CounterMaintainer;
use super::error::{ServiceError, ServiceResult};
use super::points::PointsLedger;
use super::validator::{ReactionValidator, ValidatedReaction};

/// Effect of a committed reaction mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactionOutcome {
    pub transition: Transition,
    /// Caller's reaction after the commit
    pub state: ReactionState,
    /// Points applied to the definition's author
    pub points_delta: i64,
}

impl ReactionOutcome {
    /// Human-readable summary for API responses
    pub fn message(&self) -> &'static str {
        match self.transition {
            Transition::Create(ReactionKind::Like) => "Definition liked",
            Transition::Create(ReactionKind::Dislike) => "Definition disliked",
            Transition::Flip { to: ReactionKind::Like, .. } => "Reaction switched to like",
            Transition::Flip { to: ReactionKind::Dislike, .. } => "Reaction switched to dislike",
            Transition::Delete(ReactionKind::Like) => "Like removed",
            Transition::Delete(ReactionKind::Dislike) => "Dislike removed",
        }
    }
}

/// Generic failure surfaced when a transaction fails for an unexpected reason
fn failure_message(action: ReactionAction) -> &'static str {
    match action {
        ReactionAction::React(_) | ReactionAction::Switch(_) => "Failed to save reaction",
        ReactionAction::Remove(_) => "Failed to remove reaction",
    }
}

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Like or dislike a definition
    ///
    /// Reacting with the opposite kind of an existing reaction switches it.
    pub async fn react(
        &self,
        actor: Option<UserId>,
        definition_id: DefinitionId,
        kind: ReactionKind,
    ) -> ServiceResult<ReactionOutcome> {
        self.execute(actor, definition_id, ReactionAction::React(kind))
            .await
    }

    pub async fn like(
        &self,
        actor: Option<UserId>,
        definition_id: DefinitionId,
    ) -> ServiceResult<ReactionOutcome> {
        self.react(actor, definition_id, ReactionKind::Like).await
    }

    pub async fn dislike(
        &self,
        actor: Option<UserId>,
        definition_id: DefinitionId,
    ) -> ServiceResult<ReactionOutcome> {
        self.react(actor, definition_id, ReactionKind::Dislike).await
    }

    /// Change an existing reaction to `to`
    pub async fn switch(
        &self,
        actor: Option<UserId>,
        definition_id: DefinitionId,
        to: ReactionKind,
    ) -> ServiceResult<ReactionOutcome> {
        self.execute(actor, definition_id, ReactionAction::Switch(to))
            .await
    }

    /// Withdraw an existing reaction of the given kind
    pub async fn remove(
        &self,
        actor: Option<UserId>,
        definition_id: DefinitionId,
        kind: ReactionKind,
    ) -> ServiceResult<ReactionOutcome> {
        self.execute(actor, definition_id, ReactionAction::Remove(kind))
            .await
    }

    pub async fn unlike(
        &self,
        actor: Option<UserId>,
        definition_id: DefinitionId,
    ) -> ServiceResult<ReactionOutcome> {
        self.remove(actor, definition_id, ReactionKind::Like).await
    }

    pub async fn undislike(
        &self,
        actor: Option<UserId>,
        definition_id: DefinitionId,
    ) -> ServiceResult<ReactionOutcome> {
        self.remove(actor, definition_id, ReactionKind::Dislike).await
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Denormalized like/dislike counters of a definition
    #[instrument(skip(self))]
    pub async fn counts(&self, definition_id: DefinitionId) -> ServiceResult<ReactionCounts> {
        let definition = self
            .ctx
            .definition_repo()
            .find_by_id(definition_id)
            .await?
            .ok_or(DomainError::DefinitionNotFound(definition_id))?;

        Ok(definition.counts())
    }

    /// Every ledger row on a definition, oldest first
    #[instrument(skip(self))]
    pub async fn list_reactions(&self, definition_id: DefinitionId) -> ServiceResult<Vec<Reaction>> {
        self.require_definition(definition_id).await?;
        Ok(self
            .ctx
            .reaction_repo()
            .find_by_definition(definition_id)
            .await?)
    }

    /// Number of likes in the ledger
    pub async fn count_likes(&self, definition_id: DefinitionId) -> ServiceResult<i64> {
        self.count(definition_id, ReactionKind::Like).await
    }

    /// Number of dislikes in the ledger
    pub async fn count_dislikes(&self, definition_id: DefinitionId) -> ServiceResult<i64> {
        self.count(definition_id, ReactionKind::Dislike).await
    }

    /// The caller's own reaction on a definition
    #[instrument(skip(self))]
    pub async fn current_state(
        &self,
        actor: Option<UserId>,
        definition_id: DefinitionId,
    ) -> ServiceResult<ReactionState> {
        let user_id = actor.ok_or(DomainError::Unauthenticated)?;
        self.require_definition(definition_id).await?;

        let reaction = self
            .ctx
            .reaction_repo()
            .find_by_user(user_id, definition_id)
            .await?;

        Ok(reaction.as_ref().map_or(ReactionState::None, Reaction::state))
    }

    #[instrument(skip(self))]
    async fn count(&self, definition_id: DefinitionId, kind: ReactionKind) -> ServiceResult<i64> {
        self.require_definition(definition_id).await?;
        Ok(self
            .ctx
            .reaction_repo()
            .count_by_kind(definition_id, kind)
            .await?)
    }

    async fn require_definition(&self, definition_id: DefinitionId) -> ServiceResult<()> {
        self.ctx
            .definition_repo()
            .find_by_id(definition_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| DomainError::DefinitionNotFound(definition_id).into())
    }

    // ========================================================================
    // Transaction coordination
    // ========================================================================

    #[instrument(skip(self), fields(operation = action.operation()))]
    async fn execute(
        &self,
        actor: Option<UserId>,
        definition_id: DefinitionId,
        action: ReactionAction,
    ) -> ServiceResult<ReactionOutcome> {
        let validated = ReactionValidator::new(self.ctx)
            .validate(actor, definition_id)
            .await?;
        let user_id = validated.user_id;

        let mut tx = match self.ctx.reaction_repo().begin().await {
            Ok(tx) => tx,
            Err(e) => return Err(unexpected(e.into(), user_id, definition_id, action)),
        };

        match apply(tx.as_mut(), &validated, action).await {
            Ok(outcome) => {
                tx.commit()
                    .await
                    .map_err(|e| unexpected(e.into(), user_id, definition_id, action))?;

                info!(
                    user_id = %user_id,
                    definition_id = %definition_id,
                    operation = action.operation(),
                    state = ?outcome.state,
                    points_delta = outcome.points_delta,
                    "Reaction applied"
                );
                Ok(outcome)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(
                        user_id = %user_id,
                        definition_id = %definition_id,
                        error = %rollback_err,
                        "Rollback failed"
                    );
                }
                Err(classify(err, user_id, definition_id, action))
            }
        }
    }
}

/// Ledger, counter, and points writes for one action, all through `tx`
async fn apply(
    tx: &mut dyn ReactionTransaction,
    validated: &ValidatedReaction,
    action: ReactionAction,
) -> ServiceResult<ReactionOutcome> {
    let user_id = validated.user_id;
    let definition = &validated.definition;

    let existing = tx.find_reaction(user_id, definition.id).await?;
    let state = existing.as_ref().map_or(ReactionState::None, Reaction::state);
    let transition = state.apply(action)?;

    match (transition, existing) {
        (Transition::Create(kind), _) => {
            tx.insert_reaction(NewReaction::new(user_id, definition.id, kind))
                .await
                .map_err(|e| match e {
                    DomainError::DuplicateReaction => DomainError::AlreadyReacted(kind),
                    other => other,
                })?;
        }
        (Transition::Flip { to, .. }, Some(row)) => {
            tx.update_liked(row.id, to.is_like()).await?;
        }
        (Transition::Delete(_), Some(row)) => {
            tx.delete_reaction(row.id).await?;
        }
        (_, None) => {
            return Err(DomainError::InternalError(format!(
                "{transition:?} requires an existing reaction"
            ))
            .into());
        }
    }

    CounterMaintainer::apply(tx, definition.id, transition).await?;
    let points_delta = PointsLedger::apply(tx, definition.author_id, user_id, transition).await?;

    Ok(ReactionOutcome {
        transition,
        state: transition.next_state(),
        points_delta,
    })
}

/// Keep client-facing outcomes, replace everything else with a generic failure
fn classify(
    err: ServiceError,
    user_id: UserId,
    definition_id: DefinitionId,
    action: ReactionAction,
) -> ServiceError {
    match err {
        ServiceError::Domain(DomainError::DuplicateReaction) => {
            DomainError::AlreadyReacted(action.kind()).into()
        }
        ServiceError::Domain(
            e @ (DomainError::AlreadyReacted(_)
            | DomainError::NothingToRemove(_)
            | DomainError::NothingToSwitch(_)
            | DomainError::DefinitionNotFound(_)
            | DomainError::CounterUnderflow { .. }),
        ) => e.into(),
        other => unexpected(other, user_id, definition_id, action),
    }
}

fn unexpected(
    err: ServiceError,
    user_id: UserId,
    definition_id: DefinitionId,
    action: ReactionAction,
) -> ServiceError {
    error!(
        user_id = %user_id,
        definition_id = %definition_id,
        operation = action.operation(),
        error = %err,
        "Reaction transaction failed"
    );
    ServiceError::internal(failure_message(action))
}
