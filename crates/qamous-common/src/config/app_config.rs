//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when present).

use qamous_core::UserId;
use serde::Deserialize;
use std::env;
use std::fmt;
use std::str::FromStr;

/// Prefix of `DATABASE_URL` that selects the in-process store
pub const MEMORY_DATABASE_SCHEME: &str = "memory://";

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub admin: AdminConfig,
    pub reactions: ReactionConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Test => "test",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "test" => Ok(Self::Test),
            "development" | "dev" => Ok(Self::Development),
            other => Err(ConfigError::InvalidValue("APP_ENV", other.to_string())),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

impl DatabaseConfig {
    /// Whether the url selects the in-process store instead of PostgreSQL
    #[must_use]
    pub fn is_memory(&self) -> bool {
        self.url.starts_with(MEMORY_DATABASE_SCHEME)
    }
}

/// JWT configuration
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry: i64,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Users allowed to run maintenance operations
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub user_ids: Vec<UserId>,
}

impl AdminConfig {
    #[must_use]
    pub fn is_admin(&self, user_id: UserId) -> bool {
        self.user_ids.contains(&user_id)
    }
}

/// Reaction maintenance tuning
#[derive(Debug, Clone, Deserialize)]
pub struct ReactionConfig {
    #[serde(default = "default_recalculate_batch_size")]
    pub recalculate_batch_size: i64,
}

impl Default for ReactionConfig {
    fn default() -> Self {
        Self {
            recalculate_batch_size: default_recalculate_batch_size(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "qamous".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_access_token_expiry() -> i64 {
    900 // 15 minutes
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

fn default_recalculate_batch_size() -> i64 {
    500
}

/// Parse an optional variable, falling back to `default` when unset
fn parse_or<T: FromStr>(
    value: Option<String>,
    name: &'static str,
    default: impl FnOnce() -> T,
) -> Result<T, ConfigError> {
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name, raw)),
        None => Ok(default()),
    }
}

fn split_list(value: Option<String>) -> Vec<String> {
    value
        .map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source
    ///
    /// # Errors
    /// Returns an error if required variables are missing or malformed
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let admin_ids = split_list(lookup("ADMIN_USER_IDS"))
            .into_iter()
            .map(|raw| {
                UserId::parse(&raw).map_err(|_| ConfigError::InvalidValue("ADMIN_USER_IDS", raw))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let recalculate_batch_size = parse_or(
            lookup("REACTIONS_RECALCULATE_BATCH_SIZE"),
            "REACTIONS_RECALCULATE_BATCH_SIZE",
            default_recalculate_batch_size,
        )?;
        if recalculate_batch_size <= 0 {
            return Err(ConfigError::InvalidValue(
                "REACTIONS_RECALCULATE_BATCH_SIZE",
                recalculate_batch_size.to_string(),
            ));
        }

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: lookup("APP_ENV")
                    .map(|s| s.parse())
                    .transpose()?
                    .unwrap_or_default(),
            },
            api: ServerConfig {
                host: lookup("API_HOST").unwrap_or_else(default_host),
                port: lookup("API_PORT")
                    .ok_or(ConfigError::MissingVar("API_PORT"))
                    .and_then(|s| {
                        s.trim()
                            .parse()
                            .map_err(|_| ConfigError::InvalidValue("API_PORT", s))
                    })?,
            },
            database: DatabaseConfig {
                url: lookup("DATABASE_URL").ok_or(ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: parse_or(
                    lookup("DATABASE_MAX_CONNECTIONS"),
                    "DATABASE_MAX_CONNECTIONS",
                    default_max_connections,
                )?,
                min_connections: parse_or(
                    lookup("DATABASE_MIN_CONNECTIONS"),
                    "DATABASE_MIN_CONNECTIONS",
                    default_min_connections,
                )?,
            },
            jwt: JwtConfig {
                secret: lookup("JWT_SECRET").ok_or(ConfigError::MissingVar("JWT_SECRET"))?,
                access_token_expiry: parse_or(
                    lookup("JWT_ACCESS_TOKEN_EXPIRY"),
                    "JWT_ACCESS_TOKEN_EXPIRY",
                    default_access_token_expiry,
                )?,
            },
            rate_limit: RateLimitConfig {
                requests_per_second: parse_or(
                    lookup("RATE_LIMIT_REQUESTS_PER_SECOND"),
                    "RATE_LIMIT_REQUESTS_PER_SECOND",
                    default_requests_per_second,
                )?,
                burst: parse_or(lookup("RATE_LIMIT_BURST"), "RATE_LIMIT_BURST", default_burst)?,
            },
            cors: CorsConfig {
                allowed_origins: split_list(lookup("CORS_ALLOWED_ORIGINS")),
            },
            admin: AdminConfig {
                user_ids: admin_ids,
            },
            reactions: ReactionConfig {
                recalculate_batch_size,
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
