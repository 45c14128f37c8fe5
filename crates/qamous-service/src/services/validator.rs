//! Reaction request validation
//!
//! Runs before any transaction opens: the caller must be an authenticated,
//! known user, the definition must exist, and the caller must not be its author.

use qamous_core::entities::Definition;
use qamous_core::{DefinitionId, DomainError, UserId};
use tracing::{debug, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// A request that passed validation, with the definition it targets
#[derive(Debug, Clone)]
pub struct ValidatedReaction {
    pub user_id: UserId,
    pub definition: Definition,
}

/// Read-only checks shared by every reaction mutation
pub struct ReactionValidator<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionValidator<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Validate a reaction request
    ///
    /// Returns the loaded definition so callers avoid a second fetch.
    #[instrument(skip(self))]
    pub async fn validate(
        &self,
        actor: Option<UserId>,
        definition_id: DefinitionId,
    ) -> ServiceResult<ValidatedReaction> {
        let Some(user_id) = actor else {
            debug!(definition_id = %definition_id, "Rejected unauthenticated reaction");
            return Err(DomainError::Unauthenticated.into());
        };

        // A token for a deleted or unknown user carries no identity
        if self.ctx.user_repo().find_by_id(user_id).await?.is_none() {
            debug!(user_id = %user_id, "Rejected reaction from unknown user");
            return Err(DomainError::Unauthenticated.into());
        }

        let Some(definition) = self.ctx.definition_repo().find_by_id(definition_id).await? else {
            debug!(
                user_id = %user_id,
                definition_id = %definition_id,
                "Rejected reaction to missing definition"
            );
            return Err(DomainError::DefinitionNotFound(definition_id).into());
        };

        if definition.is_authored_by(user_id) {
            debug!(
                user_id = %user_id,
                definition_id = %definition_id,
                "Rejected self-reaction"
            );
            return Err(DomainError::SelfReaction.into());
        }

        Ok(ValidatedReaction {
            user_id,
            definition,
        })
    }
}
