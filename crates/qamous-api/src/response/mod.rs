//! Response types and error handling for API endpoints
//!
//! Provides unified error handling and JSON response formatting. Reaction
//! mutations report failures as a `ReactionResponse` body instead of the
//! generic error envelope.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use qamous_common::{domain_status, AppError};
use qamous_core::DomainError;
use qamous_service::dto::ReactionResponse;
use qamous_service::ServiceError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

/// API error type for consistent error responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    App(#[from] AppError),

    #[error("{0}")]
    Service(#[from] ServiceError),

    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid path parameter: {0}")]
    InvalidPath(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Invalid authorization header format")]
    InvalidAuthFormat,

    /// Failure of a reaction mutation, rendered as `{success: false, message}`
    #[error("{message}")]
    Reaction { status: StatusCode, message: String },
}

impl ApiError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::App(e) => status_from_u16(e.status_code()),
            Self::Service(e) => status_from_u16(e.status_code()),
            Self::Domain(e) => status_from_u16(domain_status(e)),
            Self::Validation(_) | Self::InvalidPath(_) | Self::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::MissingAuth | Self::InvalidAuthFormat => StatusCode::UNAUTHORIZED,
            Self::Reaction { status, .. } => *status,
        }
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &str {
        match self {
            Self::App(e) => e.error_code(),
            Self::Service(e) => e.error_code(),
            Self::Domain(e) => e.code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidPath(_) => "INVALID_PATH_PARAMETER",
            Self::InvalidBody(_) => "INVALID_REQUEST_BODY",
            Self::MissingAuth => "MISSING_AUTHORIZATION",
            Self::InvalidAuthFormat => "INVALID_AUTHORIZATION_FORMAT",
            Self::Reaction { .. } => "REACTION_FAILED",
        }
    }

    /// Message shown to callers; store and runtime faults are reduced to a generic line
    #[must_use]
    pub fn public_message(&self) -> String {
        let hidden = match self {
            Self::Domain(e) | Self::Service(ServiceError::Domain(e)) => e.is_infrastructure(),
            Self::App(e) => hides_detail(e),
            _ => false,
        };
        if hidden {
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }

    /// Create an invalid path parameter error
    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::InvalidPath(msg.into())
    }

    /// Create an invalid body error
    pub fn invalid_body(msg: impl Into<String>) -> Self {
        Self::InvalidBody(msg.into())
    }

    /// A failed reaction mutation
    pub fn reaction(err: ServiceError) -> Self {
        Self::Service(err).into_reaction()
    }

    /// Re-render this error as a failed reaction mutation, keeping status and message
    #[must_use]
    pub fn into_reaction(self) -> Self {
        match self {
            Self::Reaction { .. } => self,
            other => {
                let status = other.status_code();
                if status.is_server_error() {
                    error!(error = %other, "Reaction request failed");
                }
                Self::Reaction {
                    status,
                    message: other.public_message(),
                }
            }
        }
    }
}

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

fn hides_detail(e: &AppError) -> bool {
    matches!(e, AppError::Database(_) | AppError::Config(_))
}

fn status_from_u16(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => Self::invalid_body(e.body_text()),
            JsonRejection::JsonSyntaxError(e) => Self::invalid_body(e.body_text()),
            JsonRejection::MissingJsonContentType(e) => Self::invalid_body(e.body_text()),
            JsonRejection::BytesRejection(e) => Self::invalid_body(e.body_text()),
            _ => Self::invalid_body("Invalid JSON body"),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Error detail for API responses
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log server errors
        if status.is_server_error() {
            error!(error = ?self, "Server error occurred");
        }

        if let Self::Reaction { message, .. } = self {
            return (status, Json(ReactionResponse::failed(message))).into_response();
        }

        let code = self.error_code().to_string();
        let message = self.public_message();

        // Build details for validation errors
        let details = if let Self::Validation(errors) = &self {
            Some(serde_json::to_value(errors).unwrap_or_default())
        } else {
            None
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
