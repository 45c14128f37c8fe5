//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{CountColumn, DefinitionId, ReactionKind, UserId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Definition {0} not found")]
    DefinitionNotFound(DefinitionId),

    #[error("User {0} not found")]
    UserNotFound(UserId),

    #[error("No {} reaction found for this definition", .0)]
    NothingToRemove(ReactionKind),

    #[error("No existing reaction to switch to {}", .0)]
    NothingToSwitch(ReactionKind),

    // =========================================================================
    // Authentication Errors
    // =========================================================================
    #[error("User must be authenticated")]
    Unauthenticated,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Cannot react to your own definition")]
    SelfReaction,

    #[error("User has already {} this definition", .0.past_tense())]
    AlreadyReacted(ReactionKind),

    /// Storage rejected a second ledger row for the same pair
    #[error("Reaction already exists for this user and definition")]
    DuplicateReaction,

    // =========================================================================
    // Consistency Errors
    // =========================================================================
    #[error("cannot update reaction counts below 0")]
    CounterUnderflow {
        definition_id: DefinitionId,
        column: CountColumn,
    },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::DefinitionNotFound(_) => "UNKNOWN_DEFINITION",
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::NothingToRemove(_) => "NOTHING_TO_REMOVE",
            Self::NothingToSwitch(_) => "NOTHING_TO_SWITCH",

            // Authentication
            Self::Unauthenticated => "UNAUTHENTICATED",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",

            // Conflict
            Self::SelfReaction => "SELF_REACTION",
            Self::AlreadyReacted(_) => "ALREADY_REACTED",
            Self::DuplicateReaction => "DUPLICATE_REACTION",

            // Consistency
            Self::CounterUnderflow { .. } => "COUNTER_UNDERFLOW",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::DefinitionNotFound(_)
                | Self::UserNotFound(_)
                | Self::NothingToRemove(_)
                | Self::NothingToSwitch(_)
        )
    }

    /// Check if this is an authentication error
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Unauthenticated)
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::SelfReaction | Self::AlreadyReacted(_) | Self::DuplicateReaction
        )
    }

    /// Store or runtime faults whose text must not reach callers
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, Self::DatabaseError(_) | Self::InternalError(_))
    }
}
