//! Reaction entity - one user's like or dislike of one definition

use chrono::{DateTime, Utc};

use crate::value_objects::{DefinitionId, ReactionId, ReactionKind, ReactionState, UserId};

/// Reaction ledger row
///
/// At most one row exists per `(user_id, definition_id)`. Switching flips `liked` in
/// place, so `id` and `created_at` stay stable for the lifetime of the stance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub id: ReactionId,
    pub definition_id: DefinitionId,
    pub user_id: UserId,
    pub liked: bool,
    pub created_at: DateTime<Utc>,
}

impl Reaction {
    #[inline]
    pub fn kind(&self) -> ReactionKind {
        ReactionKind::from_liked(self.liked)
    }

    #[inline]
    pub fn state(&self) -> ReactionState {
        ReactionState::holding(self.kind())
    }
}

/// Insert payload for a reaction; the store assigns id and timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewReaction {
    pub definition_id: DefinitionId,
    pub user_id: UserId,
    pub kind: ReactionKind,
}

impl NewReaction {
    pub fn new(user_id: UserId, definition_id: DefinitionId, kind: ReactionKind) -> Self {
        Self {
            definition_id,
            user_id,
            kind,
        }
    }
}

/// Ledger-derived like/dislike counts for one definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactionTally {
    pub definition_id: DefinitionId,
    pub likes: i64,
    pub dislikes: i64,
}

impl ReactionTally {
    pub fn empty(definition_id: DefinitionId) -> Self {
        Self {
            definition_id,
            likes: 0,
            dislikes: 0,
        }
    }
}
