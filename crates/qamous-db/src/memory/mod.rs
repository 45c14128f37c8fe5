//! In-process store
//!
//! `MemoryStore` implements every repository port over plain collections guarded by
//! one async mutex. A transaction holds the lock for its whole lifetime and works on
//! a private copy of the state, which replaces the shared state only on commit. This
//! gives serializable transactions, which is enough for tests and for `memory://`
//! development servers.

mod transaction;

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::instrument;

use qamous_core::entities::{Definition, Reaction, User};
use qamous_core::error::DomainError;
use qamous_core::traits::{
    DefinitionRepository, ReactionRepository, ReactionTransaction, RepoResult, UserRepository,
};
use qamous_core::value_objects::{DefinitionId, ReactionId, ReactionKind, UserId};

pub use transaction::MemoryTransaction;

/// Tables and sequences of the in-process store
#[derive(Debug, Clone, Default)]
pub(crate) struct MemoryState {
    pub(crate) users: BTreeMap<UserId, User>,
    pub(crate) definitions: BTreeMap<DefinitionId, Definition>,
    pub(crate) reactions: BTreeMap<ReactionId, Reaction>,
    next_user_id: i64,
    next_definition_id: i64,
    next_reaction_id: i64,
}

impl MemoryState {
    fn next_user_id(&mut self) -> UserId {
        self.next_user_id += 1;
        UserId::new(self.next_user_id)
    }

    fn next_definition_id(&mut self) -> DefinitionId {
        self.next_definition_id += 1;
        DefinitionId::new(self.next_definition_id)
    }

    pub(crate) fn next_reaction_id(&mut self) -> ReactionId {
        self.next_reaction_id += 1;
        ReactionId::new(self.next_reaction_id)
    }

    pub(crate) fn find_reaction(
        &self,
        user_id: UserId,
        definition_id: DefinitionId,
    ) -> Option<&Reaction> {
        self.reactions
            .values()
            .find(|r| r.user_id == user_id && r.definition_id == definition_id)
    }

    pub(crate) fn reactions_on(
        &self,
        definition_id: DefinitionId,
    ) -> impl Iterator<Item = &Reaction> {
        self.reactions
            .values()
            .filter(move |r| r.definition_id == definition_id)
    }
}

/// In-memory implementation of the user, definition, and reaction repositories
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a ledger row directly, bypassing counters and points
    ///
    /// Used to stage drifted or corrupted data for repair tests.
    pub async fn seed_reaction(
        &self,
        user_id: UserId,
        definition_id: DefinitionId,
        kind: ReactionKind,
    ) -> Reaction {
        let mut state = self.state.lock().await;
        let reaction = Reaction {
            id: state.next_reaction_id(),
            definition_id,
            user_id,
            liked: kind.is_like(),
            created_at: Utc::now(),
        };
        state.reactions.insert(reaction.id, reaction.clone());
        reaction
    }

    /// Overwrite a definition's counters directly
    pub async fn set_counts(&self, definition_id: DefinitionId, like_count: i64, dislike_count: i64) {
        let mut state = self.state.lock().await;
        if let Some(def) = state.definitions.get_mut(&definition_id) {
            def.like_count = like_count;
            def.dislike_count = dislike_count;
        }
    }

    /// Number of ledger rows held for a `(user, definition)` pair
    pub async fn reaction_rows(&self, user_id: UserId, definition_id: DefinitionId) -> usize {
        let state = self.state.lock().await;
        state
            .reactions_on(definition_id)
            .filter(|r| r.user_id == user_id)
            .count()
    }

    /// Total ledger rows across all definitions
    pub async fn total_reactions(&self) -> usize {
        self.state.lock().await.reactions.len()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        Ok(self.state.lock().await.users.get(&id).cloned())
    }

    #[instrument(skip(self))]
    async fn create(&self, username: &str) -> RepoResult<User> {
        let mut state = self.state.lock().await;
        if state.users.values().any(|u| u.username == username) {
            return Err(DomainError::ValidationError(format!(
                "username {username} is already taken"
            )));
        }
        let user = User::new(state.next_user_id(), username.to_string());
        state.users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl DefinitionRepository for MemoryStore {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: DefinitionId) -> RepoResult<Option<Definition>> {
        Ok(self.state.lock().await.definitions.get(&id).cloned())
    }

    #[instrument(skip(self))]
    async fn find_ids_after(
        &self,
        after: Option<DefinitionId>,
        limit: i64,
    ) -> RepoResult<Vec<DefinitionId>> {
        let state = self.state.lock().await;
        let take = usize::try_from(limit.max(1)).unwrap_or(usize::MAX);
        Ok(state
            .definitions
            .keys()
            .filter(|id| after.map_or(true, |cursor| **id > cursor))
            .take(take)
            .copied()
            .collect())
    }

    #[instrument(skip(self, body, example))]
    async fn create(
        &self,
        author_id: UserId,
        word_id: i64,
        body: &str,
        example: Option<&str>,
        is_arabic: bool,
    ) -> RepoResult<Definition> {
        let mut state = self.state.lock().await;
        if !state.users.contains_key(&author_id) {
            return Err(DomainError::UserNotFound(author_id));
        }
        let mut definition =
            Definition::new(state.next_definition_id(), word_id, author_id, body.to_string());
        definition.example = example.map(str::to_string);
        definition.is_arabic = is_arabic;
        state.definitions.insert(definition.id, definition.clone());
        Ok(definition)
    }
}

#[async_trait]
impl ReactionRepository for MemoryStore {
    async fn begin(&self) -> RepoResult<Box<dyn ReactionTransaction>> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        Ok(Box::new(MemoryTransaction::new(guard)))
    }

    #[instrument(skip(self))]
    async fn find_by_definition(&self, definition_id: DefinitionId) -> RepoResult<Vec<Reaction>> {
        let state = self.state.lock().await;
        Ok(state.reactions_on(definition_id).cloned().collect())
    }

    #[instrument(skip(self))]
    async fn count_by_kind(
        &self,
        definition_id: DefinitionId,
        kind: ReactionKind,
    ) -> RepoResult<i64> {
        let state = self.state.lock().await;
        let count = state
            .reactions_on(definition_id)
            .filter(|r| r.liked == kind.is_like())
            .count();
        Ok(count as i64)
    }

    #[instrument(skip(self))]
    async fn find_by_user(
        &self,
        user_id: UserId,
        definition_id: DefinitionId,
    ) -> RepoResult<Option<Reaction>> {
        let state = self.state.lock().await;
        Ok(state.find_reaction(user_id, definition_id).cloned())
    }

    async fn ping(&self) -> RepoResult<()> {
        Ok(())
    }
}
