//! PostgreSQL implementation of DefinitionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use qamous_core::entities::Definition;
use qamous_core::traits::{DefinitionRepository, RepoResult};
use qamous_core::value_objects::{DefinitionId, UserId};

use crate::models::DefinitionModel;

use super::error::map_db_error;

/// PostgreSQL implementation of DefinitionRepository
#[derive(Clone)]
pub struct PgDefinitionRepository {
    pool: PgPool,
}

impl PgDefinitionRepository {
    /// Create a new PgDefinitionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DefinitionRepository for PgDefinitionRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: DefinitionId) -> RepoResult<Option<Definition>> {
        let result = sqlx::query_as::<_, DefinitionModel>(
            r"
            SELECT id, word_id, user_id, definition, example, is_arabic,
                   like_count, dislike_count, created_at
            FROM definitions
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Definition::from))
    }

    #[instrument(skip(self))]
    async fn find_ids_after(
        &self,
        after: Option<DefinitionId>,
        limit: i64,
    ) -> RepoResult<Vec<DefinitionId>> {
        let ids = sqlx::query_scalar::<_, i64>(
            r"
            SELECT id
            FROM definitions
            WHERE $1::BIGINT IS NULL OR id > $1
            ORDER BY id
            LIMIT $2
            ",
        )
        .bind(after.map(DefinitionId::into_inner))
        .bind(limit.max(1))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(ids.into_iter().map(DefinitionId::new).collect())
    }

    #[instrument(skip(self, body, example))]
    async fn create(
        &self,
        author_id: UserId,
        word_id: i64,
        body: &str,
        example: Option<&str>,
        is_arabic: bool,
    ) -> RepoResult<Definition> {
        let model = sqlx::query_as::<_, DefinitionModel>(
            r"
            INSERT INTO definitions (word_id, user_id, definition, example, is_arabic)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, word_id, user_id, definition, example, is_arabic,
                      like_count, dislike_count, created_at
            ",
        )
        .bind(word_id)
        .bind(author_id.into_inner())
        .bind(body)
        .bind(example)
        .bind(is_arabic)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Definition::from(model))
    }
}
