//! Unit of work over the in-process store

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::OwnedMutexGuard;
use tracing::instrument;

use qamous_core::entities::{NewReaction, Reaction, ReactionTally};
use qamous_core::error::DomainError;
use qamous_core::traits::{ReactionTransaction, RepoResult};
use qamous_core::value_objects::{CountColumn, CountDelta, DefinitionId, ReactionId, UserId};

use super::MemoryState;

/// Exclusive transaction on a [`MemoryStore`](super::MemoryStore)
///
/// Writes go to `working`; `commit` copies it over the shared state. Dropping the
/// handle releases the lock and leaves the shared state untouched.
pub struct MemoryTransaction {
    guard: OwnedMutexGuard<MemoryState>,
    working: MemoryState,
}

impl MemoryTransaction {
    pub(crate) fn new(guard: OwnedMutexGuard<MemoryState>) -> Self {
        let working = guard.clone();
        Self { guard, working }
    }
}

#[async_trait]
impl ReactionTransaction for MemoryTransaction {
    async fn find_reaction(
        &mut self,
        user_id: UserId,
        definition_id: DefinitionId,
    ) -> RepoResult<Option<Reaction>> {
        Ok(self.working.find_reaction(user_id, definition_id).cloned())
    }

    #[instrument(skip(self))]
    async fn insert_reaction(&mut self, reaction: NewReaction) -> RepoResult<Reaction> {
        if self
            .working
            .find_reaction(reaction.user_id, reaction.definition_id)
            .is_some()
        {
            return Err(DomainError::DuplicateReaction);
        }
        if !self.working.definitions.contains_key(&reaction.definition_id) {
            return Err(DomainError::DefinitionNotFound(reaction.definition_id));
        }
        if !self.working.users.contains_key(&reaction.user_id) {
            return Err(DomainError::UserNotFound(reaction.user_id));
        }

        let row = Reaction {
            id: self.working.next_reaction_id(),
            definition_id: reaction.definition_id,
            user_id: reaction.user_id,
            liked: reaction.kind.is_like(),
            created_at: Utc::now(),
        };
        self.working.reactions.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_liked(&mut self, id: ReactionId, liked: bool) -> RepoResult<()> {
        let row = self.working.reactions.get_mut(&id).ok_or_else(|| {
            DomainError::InternalError(format!("reaction {id} vanished during update"))
        })?;
        row.liked = liked;
        Ok(())
    }

    async fn delete_reaction(&mut self, id: ReactionId) -> RepoResult<()> {
        self.working
            .reactions
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::InternalError(format!("reaction {id} vanished during delete")))
    }

    async fn adjust_count(
        &mut self,
        definition_id: DefinitionId,
        column: CountColumn,
        delta: CountDelta,
    ) -> RepoResult<bool> {
        let Some(def) = self.working.definitions.get_mut(&definition_id) else {
            return Ok(false);
        };
        let counter = match column {
            CountColumn::LikeCount => &mut def.like_count,
            CountColumn::DislikeCount => &mut def.dislike_count,
        };
        if delta == CountDelta::Decrement && *counter <= 0 {
            return Ok(false);
        }
        *counter += delta.value();
        Ok(true)
    }

    async fn increment_points(&mut self, user_id: UserId, delta: i64) -> RepoResult<()> {
        let user = self
            .working
            .users
            .get_mut(&user_id)
            .ok_or(DomainError::UserNotFound(user_id))?;
        user.points += delta;
        Ok(())
    }

    async fn tally(&mut self, definition_ids: &[DefinitionId]) -> RepoResult<Vec<ReactionTally>> {
        let mut ids: Vec<DefinitionId> = definition_ids
            .iter()
            .copied()
            .filter(|id| self.working.definitions.contains_key(id))
            .collect();
        ids.sort_unstable();
        ids.dedup();

        Ok(ids
            .into_iter()
            .map(|definition_id| {
                let (likes, dislikes) = self
                    .working
                    .reactions_on(definition_id)
                    .fold((0, 0), |(likes, dislikes), r| {
                        if r.liked {
                            (likes + 1, dislikes)
                        } else {
                            (likes, dislikes + 1)
                        }
                    });
                ReactionTally {
                    definition_id,
                    likes,
                    dislikes,
                }
            })
            .collect())
    }

    async fn overwrite_counts(&mut self, tally: &ReactionTally) -> RepoResult<()> {
        if let Some(def) = self.working.definitions.get_mut(&tally.definition_id) {
            def.like_count = tally.likes;
            def.dislike_count = tally.dislikes;
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn clear_all(&mut self) -> RepoResult<u64> {
        let deleted = self.working.reactions.len() as u64;
        self.working.reactions.clear();
        for def in self.working.definitions.values_mut() {
            def.like_count = 0;
            def.dislike_count = 0;
        }
        for user in self.working.users.values_mut() {
            user.points = 0;
        }
        Ok(deleted)
    }

    async fn commit(self: Box<Self>) -> RepoResult<()> {
        let Self { mut guard, working } = *self;
        *guard = working;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> RepoResult<()> {
        Ok(())
    }
}
