//! Entity to model mappers
//!
//! Conversions from database rows (`models`) to domain entities (qamous-core).

mod definition;
mod reaction;
mod user;
