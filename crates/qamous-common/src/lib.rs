//! # qamous-common
//!
//! Shared utilities including configuration, error handling, authentication, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{AccessToken, Claims, JwtService};
pub use config::{
    AdminConfig, AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment,
    JwtConfig, RateLimitConfig, ReactionConfig, ServerConfig, MEMORY_DATABASE_SCHEME,
};
pub use error::{domain_status, AppError, AppResult};
pub use telemetry::{
    init_tracing, init_tracing_with_config, try_init_tracing, try_init_tracing_with_config,
    TracingConfig, TracingError,
};
