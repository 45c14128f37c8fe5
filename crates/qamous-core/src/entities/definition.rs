//! Definition entity - a user-authored meaning of a dictionary word
//!
//! Definitions are the reaction target. They own the denormalized `like_count` and
//! `dislike_count` columns, which only the reaction subsystem writes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{DefinitionId, ReactionKind, UserId};

/// Definition entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub id: DefinitionId,
    pub word_id: i64,
    pub author_id: UserId,
    pub body: String,
    pub example: Option<String>,
    pub is_arabic: bool,
    pub like_count: i64,
    pub dislike_count: i64,
    pub created_at: DateTime<Utc>,
}

impl Definition {
    /// Create a new Definition with zeroed counters
    pub fn new(id: DefinitionId, word_id: i64, author_id: UserId, body: String) -> Self {
        Self {
            id,
            word_id,
            author_id,
            body,
            example: None,
            is_arabic: false,
            like_count: 0,
            dislike_count: 0,
            created_at: Utc::now(),
        }
    }

    /// Check if the given user wrote this definition
    #[inline]
    pub fn is_authored_by(&self, user_id: UserId) -> bool {
        self.author_id == user_id
    }

    /// Snapshot of the denormalized counters
    #[inline]
    pub fn counts(&self) -> ReactionCounts {
        ReactionCounts {
            like_count: self.like_count,
            dislike_count: self.dislike_count,
        }
    }
}

/// Like/dislike aggregate for one definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReactionCounts {
    pub like_count: i64,
    pub dislike_count: i64,
}

impl ReactionCounts {
    pub fn new(like_count: i64, dislike_count: i64) -> Self {
        Self {
            like_count,
            dislike_count,
        }
    }

    /// Value of the counter tracking `kind`
    pub fn get(&self, kind: ReactionKind) -> i64 {
        match kind {
            ReactionKind::Like => self.like_count,
            ReactionKind::Dislike => self.dislike_count,
        }
    }

    /// Both counters are non-negative
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.like_count >= 0 && self.dislike_count >= 0
    }
}
