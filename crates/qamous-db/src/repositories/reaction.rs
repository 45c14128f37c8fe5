//! PostgreSQL implementation of ReactionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use qamous_core::entities::Reaction;
use qamous_core::traits::{ReactionRepository, ReactionTransaction, RepoResult};
use qamous_core::value_objects::{DefinitionId, ReactionKind, UserId};

use crate::models::ReactionModel;

use super::error::map_db_error;
use super::transaction::PgReactionTransaction;

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    /// Create a new PgReactionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self))]
    async fn begin(&self) -> RepoResult<Box<dyn ReactionTransaction>> {
        let tx = self.pool.begin().await.map_err(map_db_error)?;
        Ok(Box::new(PgReactionTransaction::new(tx)))
    }

    #[instrument(skip(self))]
    async fn find_by_definition(&self, definition_id: DefinitionId) -> RepoResult<Vec<Reaction>> {
        let results = sqlx::query_as::<_, ReactionModel>(
            r"
            SELECT id, definition_id, user_id, liked, created_at
            FROM definition_reactions
            WHERE definition_id = $1
            ORDER BY created_at, id
            ",
        )
        .bind(definition_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Reaction::from).collect())
    }

    #[instrument(skip(self))]
    async fn count_by_kind(
        &self,
        definition_id: DefinitionId,
        kind: ReactionKind,
    ) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*)
            FROM definition_reactions
            WHERE definition_id = $1 AND liked = $2
            ",
        )
        .bind(definition_id.into_inner())
        .bind(kind.is_like())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn find_by_user(
        &self,
        user_id: UserId,
        definition_id: DefinitionId,
    ) -> RepoResult<Option<Reaction>> {
        let result = sqlx::query_as::<_, ReactionModel>(
            r"
            SELECT id, definition_id, user_id, liked, created_at
            FROM definition_reactions
            WHERE user_id = $1 AND definition_id = $2
            ",
        )
        .bind(user_id.into_inner())
        .bind(definition_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Reaction::from))
    }

    #[instrument(skip(self))]
    async fn ping(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}
