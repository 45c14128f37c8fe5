//! Integration test utilities for the reaction API
//!
//! Spawns the REST API on an in-memory store and drives it over HTTP.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
