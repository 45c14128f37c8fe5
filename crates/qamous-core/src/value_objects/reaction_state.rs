//! Reaction state machine
//!
//! A `(user, definition)` pair is always in exactly one of three states: no reaction,
//! liked, or disliked. Requests are expressed as a [`ReactionAction`]; applying an
//! action to the current [`ReactionState`] yields either the [`Transition`] to execute
//! or the domain error that rejects it.
//!
//! | From     | Action          | Result                          |
//! |----------|-----------------|---------------------------------|
//! | None     | React(k)        | Create(k)                       |
//! | k        | React(k)        | AlreadyReacted                  |
//! | k        | React(!k)       | Flip { from: k, to: !k }        |
//! | k        | Switch(!k)      | Flip { from: k, to: !k }        |
//! | k        | Switch(k)       | AlreadyReacted                  |
//! | None     | Switch(k)       | NothingToSwitch                 |
//! | k        | Remove(k)       | Delete(k)                       |
//! | None/!k  | Remove(k)       | NothingToRemove                 |

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Stance a user takes on a definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Like,
    Dislike,
}

impl ReactionKind {
    /// Map the ledger's `liked` flag to a kind
    #[inline]
    pub const fn from_liked(liked: bool) -> Self {
        if liked {
            Self::Like
        } else {
            Self::Dislike
        }
    }

    /// Value stored in the ledger's `liked` column
    #[inline]
    pub const fn is_like(self) -> bool {
        matches!(self, Self::Like)
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Like => Self::Dislike,
            Self::Dislike => Self::Like,
        }
    }

    /// Denormalized counter that tracks this kind
    #[inline]
    pub const fn column(self) -> CountColumn {
        match self {
            Self::Like => CountColumn::LikeCount,
            Self::Dislike => CountColumn::DislikeCount,
        }
    }

    /// Past-tense verb used in user-facing messages ("liked" / "disliked")
    pub const fn past_tense(self) -> &'static str {
        match self {
            Self::Like => "liked",
            Self::Dislike => "disliked",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Denormalized aggregate column on a definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CountColumn {
    LikeCount,
    DislikeCount,
}

impl CountColumn {
    /// Column name in the `definitions` table
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LikeCount => "like_count",
            Self::DislikeCount => "dislike_count",
        }
    }
}

impl fmt::Display for CountColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit change applied to a counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountDelta {
    Increment,
    Decrement,
}

impl CountDelta {
    #[inline]
    pub const fn value(self) -> i64 {
        match self {
            Self::Increment => 1,
            Self::Decrement => -1,
        }
    }
}

/// Current reaction of a user on a definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionState {
    #[default]
    None,
    Liked,
    Disliked,
}

impl ReactionState {
    /// State implied by an optional ledger row's `liked` flag
    pub fn from_liked(liked: Option<bool>) -> Self {
        match liked {
            None => Self::None,
            Some(true) => Self::Liked,
            Some(false) => Self::Disliked,
        }
    }

    /// The kind currently held, if any
    pub const fn kind(self) -> Option<ReactionKind> {
        match self {
            Self::None => None,
            Self::Liked => Some(ReactionKind::Like),
            Self::Disliked => Some(ReactionKind::Dislike),
        }
    }

    pub const fn holding(kind: ReactionKind) -> Self {
        match kind {
            ReactionKind::Like => Self::Liked,
            ReactionKind::Dislike => Self::Disliked,
        }
    }

    /// Resolve an action against this state
    ///
    /// # Errors
    /// Returns `AlreadyReacted`, `NothingToSwitch`, or `NothingToRemove` when the
    /// action is not a legal transition out of this state.
    pub fn apply(self, action: ReactionAction) -> Result<Transition, DomainError> {
        match (self.kind(), action) {
            (None, ReactionAction::React(kind)) => Ok(Transition::Create(kind)),
            (Some(held), ReactionAction::React(kind) | ReactionAction::Switch(kind))
                if held == kind =>
            {
                Err(DomainError::AlreadyReacted(kind))
            }
            (Some(held), ReactionAction::React(kind) | ReactionAction::Switch(kind)) => {
                Ok(Transition::Flip { from: held, to: kind })
            }
            (None, ReactionAction::Switch(kind)) => Err(DomainError::NothingToSwitch(kind)),
            (Some(held), ReactionAction::Remove(kind)) if held == kind => {
                Ok(Transition::Delete(kind))
            }
            (_, ReactionAction::Remove(kind)) => Err(DomainError::NothingToRemove(kind)),
        }
    }
}

/// A reaction request from a user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionAction {
    /// Like or dislike; switches when the opposite kind is held
    React(ReactionKind),
    /// Change an existing reaction to the given kind
    Switch(ReactionKind),
    /// Withdraw an existing reaction of the given kind
    Remove(ReactionKind),
}

impl ReactionAction {
    /// Operation name used in logs
    pub const fn operation(self) -> &'static str {
        match self {
            Self::React(_) => "react",
            Self::Switch(_) => "switch",
            Self::Remove(_) => "remove",
        }
    }

    pub const fn kind(self) -> ReactionKind {
        match self {
            Self::React(kind) | Self::Switch(kind) | Self::Remove(kind) => kind,
        }
    }
}

/// Legal state change, carrying everything needed to update ledger, counters, and points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Insert a new ledger row
    Create(ReactionKind),
    /// Flip the `liked` flag of the existing row in place
    Flip { from: ReactionKind, to: ReactionKind },
    /// Delete the existing row
    Delete(ReactionKind),
}

impl Transition {
    /// State after the transition commits
    pub const fn next_state(self) -> ReactionState {
        match self {
            Self::Create(kind) | Self::Flip { to: kind, .. } => ReactionState::holding(kind),
            Self::Delete(_) => ReactionState::None,
        }
    }

    /// Counter changes, decrements first so a failed guard aborts before any increment
    pub fn count_adjustments(self) -> Vec<(CountColumn, CountDelta)> {
        match self {
            Self::Create(kind) => vec![(kind.column(), CountDelta::Increment)],
            Self::Flip { from, to } => vec![
                (from.column(), CountDelta::Decrement),
                (to.column(), CountDelta::Increment),
            ],
            Self::Delete(kind) => vec![(kind.column(), CountDelta::Decrement)],
        }
    }

    /// Points applied to the definition's author
    ///
    /// A switch is "undo old" plus "apply new", so its magnitude is two.
    pub const fn points_delta(self) -> i64 {
        match self {
            Self::Create(ReactionKind::Like) | Self::Delete(ReactionKind::Dislike) => 1,
            Self::Create(ReactionKind::Dislike) | Self::Delete(ReactionKind::Like) => -1,
            Self::Flip { to: ReactionKind::Like, .. } => 2,
            Self::Flip { to: ReactionKind::Dislike, .. } => -2,
        }
    }
}
