//! # qamous-db
//!
//! Storage layer implementing the qamous-core repository traits.
//!
//! ## Overview
//!
//! - PostgreSQL repositories via SQLx, with schema migrations applied at startup
//! - `PgReactionTransaction`, the unit of work behind every reaction mutation
//! - `MemoryStore`, a transactional in-process store for tests and `memory://` servers
//!
//! ## Usage
//!
//! ```rust,ignore
//! use qamous_db::{create_pool, run_migrations, DatabaseConfig, PgReactionRepository};
//! use qamous_core::traits::ReactionRepository;
//!
//! async fn example(config: &qamous_common::AppConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::from(&config.database)).await?;
//!     run_migrations(&pool).await?;
//!     let reactions = PgReactionRepository::new(pool);
//!     let tx = reactions.begin().await?;
//!     tx.commit().await?;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::{MemoryStore, MemoryTransaction};
pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgDefinitionRepository, PgReactionRepository, PgReactionTransaction, PgUserRepository,
};
