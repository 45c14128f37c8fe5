//! Domain entities - core business objects

mod definition;
mod reaction;
mod user;

pub use definition::{Definition, ReactionCounts};
pub use reaction::{NewReaction, Reaction, ReactionTally};
pub use user::User;
