//! Authentication extractor
//!
//! Extracts and validates JWT tokens from the Authorization header.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use qamous_core::UserId;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated user extracted from JWT token
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    /// User ID from the JWT token
    pub user_id: UserId,
}

impl AuthUser {
    /// Create a new AuthUser
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

fn authenticate(state: &AppState, token: &str) -> Result<AuthUser, ApiError> {
    let claims = state.jwt_service().validate_access_token(token).map_err(|e| {
        tracing::warn!(error = %e, "Invalid access token");
        ApiError::InvalidAuthFormat
    })?;

    let user_id = claims.user_id().map_err(|e| {
        tracing::warn!(error = %e, "Invalid user ID in token");
        ApiError::InvalidAuthFormat
    })?;

    Ok(AuthUser::new(user_id))
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        authenticate(&AppState::from_ref(state), bearer.token())
    }
}

/// Caller identity for reaction endpoints
///
/// Never rejects: a missing or unusable token yields an anonymous caller, and the
/// reaction validator reports it as unauthenticated.
#[derive(Debug, Clone, Copy)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl OptionalAuthUser {
    pub fn user_id(&self) -> Option<UserId> {
        self.0.map(|auth| auth.user_id)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_result =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await;

        match auth_result {
            Ok(TypedHeader(Authorization(bearer))) => Ok(OptionalAuthUser(
                authenticate(&AppState::from_ref(state), bearer.token()).ok(),
            )),
            Err(_) => Ok(OptionalAuthUser(None)),
        }
    }
}
