//! Configuration structs

mod app_config;

pub use app_config::{
    AdminConfig, AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment,
    JwtConfig, RateLimitConfig, ReactionConfig, ServerConfig, MEMORY_DATABASE_SCHEME,
};
