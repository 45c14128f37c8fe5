//! Axum extractors for request handling
//!
//! Custom extractors for authentication, path parameters, and validation.

mod auth;
mod path;
mod validated;

pub use auth::{AuthUser, OptionalAuthUser};
pub use path::DefinitionPath;
pub use validated::{OptionalValidatedJson, ValidatedJson};
