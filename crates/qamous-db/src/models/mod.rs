//! Database models - SQLx-compatible structs for PostgreSQL tables

mod definition;
mod reaction;
mod user;

pub use definition::DefinitionModel;
pub use reaction::{ReactionModel, ReactionTallyModel};
pub use user::UserModel;
