//! Value objects - immutable types that represent domain concepts

mod id;
mod reaction_state;

pub use id::{DefinitionId, IdParseError, ReactionId, UserId};
pub use reaction_state::{
    CountColumn, CountDelta, ReactionAction, ReactionKind, ReactionState, Transition,
};
