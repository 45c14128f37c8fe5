//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Every reaction mutation goes through a
//! [`ReactionTransaction`], an explicit unit of work that is passed to each
//! ledger, counter, and points call instead of living in ambient state.

use async_trait::async_trait;

use crate::entities::{Definition, NewReaction, Reaction, ReactionTally, User};
use crate::error::DomainError;
use crate::value_objects::{CountColumn, CountDelta, DefinitionId, ReactionId, ReactionKind, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Create a new user, returning it with its assigned id
    async fn create(&self, username: &str) -> RepoResult<User>;
}

// ============================================================================
// Definition Repository
// ============================================================================

#[async_trait]
pub trait DefinitionRepository: Send + Sync {
    /// Find definition by ID
    async fn find_by_id(&self, id: DefinitionId) -> RepoResult<Option<Definition>>;

    /// Definition ids strictly greater than `after`, ascending, at most `limit`
    async fn find_ids_after(
        &self,
        after: Option<DefinitionId>,
        limit: i64,
    ) -> RepoResult<Vec<DefinitionId>>;

    /// Create a new definition with zeroed counters
    async fn create(
        &self,
        author_id: UserId,
        word_id: i64,
        body: &str,
        example: Option<&str>,
        is_arabic: bool,
    ) -> RepoResult<Definition>;
}

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Open a unit of work
    async fn begin(&self) -> RepoResult<Box<dyn ReactionTransaction>>;

    /// All reactions on a definition, oldest first
    async fn find_by_definition(&self, definition_id: DefinitionId) -> RepoResult<Vec<Reaction>>;

    /// Count ledger rows of one kind for a definition
    async fn count_by_kind(&self, definition_id: DefinitionId, kind: ReactionKind)
        -> RepoResult<i64>;

    /// Find the reaction a user holds on a definition (outside any transaction)
    async fn find_by_user(
        &self,
        user_id: UserId,
        definition_id: DefinitionId,
    ) -> RepoResult<Option<Reaction>>;

    /// Check the store is reachable
    async fn ping(&self) -> RepoResult<()>;
}

/// Transactional handle over the reaction ledger, definition counters, and user points
///
/// Dropping a handle without calling [`commit`](ReactionTransaction::commit) discards
/// every write made through it.
#[async_trait]
pub trait ReactionTransaction: Send {
    /// Re-read the pair's reaction, locking the row until the transaction ends
    async fn find_reaction(
        &mut self,
        user_id: UserId,
        definition_id: DefinitionId,
    ) -> RepoResult<Option<Reaction>>;

    /// Insert a ledger row; fails with `DuplicateReaction` if the pair already has one
    async fn insert_reaction(&mut self, reaction: NewReaction) -> RepoResult<Reaction>;

    /// Flip the stance of an existing row in place
    async fn update_liked(&mut self, id: ReactionId, liked: bool) -> RepoResult<()>;

    /// Delete a ledger row
    async fn delete_reaction(&mut self, id: ReactionId) -> RepoResult<()>;

    /// Apply a unit change to a definition counter
    ///
    /// Decrements only apply when the current value is positive. Returns `false` when
    /// the guard rejected the write or the definition does not exist.
    async fn adjust_count(
        &mut self,
        definition_id: DefinitionId,
        column: CountColumn,
        delta: CountDelta,
    ) -> RepoResult<bool>;

    /// Add `delta` to a user's points; fails with `UserNotFound` if there is no such user
    async fn increment_points(&mut self, user_id: UserId, delta: i64) -> RepoResult<()>;

    /// Ledger-derived counts for the given definitions, one entry per existing definition
    ///
    /// Locks the definitions until the transaction ends, so no reaction can
    /// change their counters between the tally and `overwrite_counts`.
    async fn tally(&mut self, definition_ids: &[DefinitionId]) -> RepoResult<Vec<ReactionTally>>;

    /// Overwrite a definition's counters with ledger-derived values
    async fn overwrite_counts(&mut self, tally: &ReactionTally) -> RepoResult<()>;

    /// Delete every reaction and zero all counters and points; returns rows deleted
    async fn clear_all(&mut self) -> RepoResult<u64>;

    /// Make every write visible
    async fn commit(self: Box<Self>) -> RepoResult<()>;

    /// Discard every write
    async fn rollback(self: Box<Self>) -> RepoResult<()>;
}
