//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use qamous_core::entities::User;
use qamous_core::error::DomainError;
use qamous_core::traits::{RepoResult, UserRepository};
use qamous_core::value_objects::UserId;

use crate::models::UserModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, username, points, created_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn create(&self, username: &str) -> RepoResult<User> {
        let model = sqlx::query_as::<_, UserModel>(
            r"
            INSERT INTO users (username)
            VALUES ($1)
            RETURNING id, username, points, created_at
            ",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || {
                DomainError::ValidationError(format!("username {username} is already taken"))
            })
        })?;

        Ok(User::from(model))
    }
}
