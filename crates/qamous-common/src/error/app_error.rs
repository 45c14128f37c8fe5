//! Application error types
//!
//! Unified error handling shared by the service and HTTP layers.

use qamous_core::DomainError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    // Database errors
    #[error("Database error: {0}")]
    Database(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            // 401 Unauthorized
            Self::InvalidToken | Self::TokenExpired => 401,

            // 403 Forbidden
            Self::InsufficientPermissions => 403,

            // 500 Internal Server Error
            Self::Database(_) | Self::Internal(_) | Self::Config(_) => 500,
        }
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::InsufficientPermissions => "INSUFFICIENT_PERMISSIONS",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// HTTP status for a domain error class
#[must_use]
pub fn domain_status(e: &DomainError) -> u16 {
    if e.is_authentication() {
        401
    } else if e.is_not_found() {
        404
    } else if e.is_validation() {
        400
    } else if e.is_conflict() {
        409
    } else {
        500
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use qamous_core::{DefinitionId, ReactionKind};

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::InvalidToken.status_code(), 401);
        assert_eq!(AppError::TokenExpired.status_code(), 401);
        assert_eq!(AppError::InsufficientPermissions.status_code(), 403);
        assert_eq!(AppError::Database("test".to_string()).status_code(), 500);
        assert_eq!(AppError::Config("bad port".to_string()).status_code(), 500);
    }

    #[test]
    fn test_domain_status_codes() {
        assert_eq!(domain_status(&DomainError::Unauthenticated), 401);
        assert_eq!(
            domain_status(&DomainError::DefinitionNotFound(DefinitionId::new(1))),
            404
        );
        assert_eq!(
            domain_status(&DomainError::NothingToRemove(ReactionKind::Like)),
            404
        );
        assert_eq!(
            domain_status(&DomainError::ValidationError("x".to_string())),
            400
        );
        assert_eq!(domain_status(&DomainError::SelfReaction), 409);
        assert_eq!(
            domain_status(&DomainError::AlreadyReacted(ReactionKind::Dislike)),
            409
        );
        assert_eq!(
            domain_status(&DomainError::DatabaseError("down".to_string())),
            500
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::InvalidToken.error_code(), "INVALID_TOKEN");
        assert_eq!(AppError::Database("x".to_string()).error_code(), "DATABASE_ERROR");
        assert_eq!(AppError::TokenExpired.error_code(), "TOKEN_EXPIRED");
    }

    #[test]
    fn test_internal_hides_source() {
        let err = AppError::internal(anyhow::anyhow!("signing key rejected"));
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.to_string(), "Internal server error");
    }
}
