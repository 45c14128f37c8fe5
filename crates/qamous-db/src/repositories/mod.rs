//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in qamous-core.

mod definition;
mod error;
mod reaction;
mod transaction;
mod user;

pub use definition::PgDefinitionRepository;
pub use reaction::PgReactionRepository;
pub use transaction::PgReactionTransaction;
pub use user::PgUserRepository;
