//! # qamous-core
//!
//! Domain layer for the Qamous reaction subsystem: entities, value objects, the
//! reaction state machine, and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Definition, NewReaction, Reaction, ReactionCounts, ReactionTally, User};
pub use error::DomainError;
pub use traits::{
    DefinitionRepository, ReactionRepository, ReactionTransaction, RepoResult, UserRepository,
};
pub use value_objects::{
    CountColumn, CountDelta, DefinitionId, IdParseError, ReactionAction, ReactionId,
    ReactionKind, ReactionState, Transition, UserId,
};
