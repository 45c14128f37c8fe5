//! JWT utilities for authentication
//!
//! Sessions are issued elsewhere; this service only mints and validates short-lived
//! access tokens whose subject is the acting user's id.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use qamous_core::UserId;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Get the subject as a user id
    ///
    /// # Errors
    /// Returns an error if the subject is not a numeric id
    pub fn user_id(&self) -> AppResult<UserId> {
        UserId::parse(&self.sub).map_err(|_| AppError::InvalidToken)
    }
}

/// Access token returned to callers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// JWT service for encoding and decoding tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expiry: i64,
}

impl JwtService {
    /// Create a new JWT service with the given secret and expiry in seconds
    #[must_use]
    pub fn new(secret: &str, access_token_expiry: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expiry,
        }
    }

    /// Issue an access token for a user
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue_access_token(&self, user_id: UserId) -> AppResult<AccessToken> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.access_token_expiry)).timestamp(),
        };

        let access_token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(AppError::internal)?;

        Ok(AccessToken {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_expiry,
        })
    }

    /// Validate an access token and return the claims
    ///
    /// # Errors
    /// Returns an error if the token is invalid or expired
    pub fn validate_access_token(&self, token: &str) -> AppResult<Claims> {
        let validation = Validation::default();

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            }
        })?;

        Ok(token_data.claims)
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_token_expiry", &self.access_token_expiry)
            .finish_non_exhaustive()
    }
}
