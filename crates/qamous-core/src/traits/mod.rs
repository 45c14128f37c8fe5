//! Ports implemented by the infrastructure layer

mod repositories;

pub use repositories::{
    DefinitionRepository, ReactionRepository, ReactionTransaction, RepoResult, UserRepository,
};
