//! PostgreSQL unit of work for reaction mutations
//!
//! Wraps a `sqlx` transaction. Every statement runs on the same connection, so
//! the ledger row, the definition counters, and the author's points commit or
//! roll back together. Dropping the handle without committing rolls back.

use async_trait::async_trait;
use sqlx::{Postgres, Transaction};
use tracing::instrument;

use qamous_core::entities::{NewReaction, Reaction, ReactionTally};
use qamous_core::error::DomainError;
use qamous_core::traits::{ReactionTransaction, RepoResult};
use qamous_core::value_objects::{CountColumn, CountDelta, DefinitionId, ReactionId, UserId};

use crate::models::{ReactionModel, ReactionTallyModel};

use super::error::{map_db_error, map_unique_violation};

/// Conditional counter update; decrements never take a column below zero
fn adjust_count_sql(column: CountColumn, delta: CountDelta) -> &'static str {
    match (column, delta) {
        (CountColumn::LikeCount, CountDelta::Increment) => {
            "UPDATE definitions SET like_count = like_count + 1 WHERE id = $1"
        }
        (CountColumn::LikeCount, CountDelta::Decrement) => {
            "UPDATE definitions SET like_count = like_count - 1 WHERE id = $1 AND like_count > 0"
        }
        (CountColumn::DislikeCount, CountDelta::Increment) => {
            "UPDATE definitions SET dislike_count = dislike_count + 1 WHERE id = $1"
        }
        (CountColumn::DislikeCount, CountDelta::Decrement) => {
            "UPDATE definitions SET dislike_count = dislike_count - 1 WHERE id = $1 AND dislike_count > 0"
        }
    }
}

/// PostgreSQL implementation of ReactionTransaction
pub struct PgReactionTransaction {
    tx: Transaction<'static, Postgres>,
}

impl PgReactionTransaction {
    pub fn new(tx: Transaction<'static, Postgres>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl ReactionTransaction for PgReactionTransaction {
    #[instrument(skip(self))]
    async fn find_reaction(
        &mut self,
        user_id: UserId,
        definition_id: DefinitionId,
    ) -> RepoResult<Option<Reaction>> {
        let result = sqlx::query_as::<_, ReactionModel>(
            r"
            SELECT id, definition_id, user_id, liked, created_at
            FROM definition_reactions
            WHERE user_id = $1 AND definition_id = $2
            FOR UPDATE
            ",
        )
        .bind(user_id.into_inner())
        .bind(definition_id.into_inner())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Reaction::from))
    }

    #[instrument(skip(self))]
    async fn insert_reaction(&mut self, reaction: NewReaction) -> RepoResult<Reaction> {
        let model = sqlx::query_as::<_, ReactionModel>(
            r"
            INSERT INTO definition_reactions (definition_id, user_id, liked)
            VALUES ($1, $2, $3)
            RETURNING id, definition_id, user_id, liked, created_at
            ",
        )
        .bind(reaction.definition_id.into_inner())
        .bind(reaction.user_id.into_inner())
        .bind(reaction.kind.is_like())
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::DuplicateReaction))?;

        Ok(Reaction::from(model))
    }

    #[instrument(skip(self))]
    async fn update_liked(&mut self, id: ReactionId, liked: bool) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE definition_reactions SET liked = $2 WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .bind(liked)
        .execute(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::InternalError(format!(
                "reaction {id} vanished during update"
            )));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_reaction(&mut self, id: ReactionId) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM definition_reactions WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .execute(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::InternalError(format!(
                "reaction {id} vanished during delete"
            )));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn adjust_count(
        &mut self,
        definition_id: DefinitionId,
        column: CountColumn,
        delta: CountDelta,
    ) -> RepoResult<bool> {
        let result = sqlx::query(adjust_count_sql(column, delta))
            .bind(definition_id.into_inner())
            .execute(&mut *self.tx)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() == 1)
    }

    #[instrument(skip(self))]
    async fn increment_points(&mut self, user_id: UserId, delta: i64) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users SET points = points + $2 WHERE id = $1
            ",
        )
        .bind(user_id.into_inner())
        .bind(delta)
        .execute(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::UserNotFound(user_id));
        }
        Ok(())
    }

    #[instrument(skip(self, definition_ids), fields(batch = definition_ids.len()))]
    async fn tally(&mut self, definition_ids: &[DefinitionId]) -> RepoResult<Vec<ReactionTally>> {
        let ids: Vec<i64> = definition_ids.iter().map(|id| id.into_inner()).collect();

        // Reaction mutations update these rows too, so they either commit before
        // the tally reads the ledger or queue behind the overwrite.
        sqlx::query("SELECT id FROM definitions WHERE id = ANY($1) ORDER BY id FOR UPDATE")
            .bind(&ids)
            .execute(&mut *self.tx)
            .await
            .map_err(map_db_error)?;

        let results = sqlx::query_as::<_, ReactionTallyModel>(
            r"
            SELECT d.id AS definition_id,
                   COUNT(r.id) FILTER (WHERE r.liked) AS likes,
                   COUNT(r.id) FILTER (WHERE NOT r.liked) AS dislikes
            FROM definitions d
            LEFT JOIN definition_reactions r ON r.definition_id = d.id
            WHERE d.id = ANY($1)
            GROUP BY d.id
            ORDER BY d.id
            ",
        )
        .bind(ids)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ReactionTally::from).collect())
    }

    #[instrument(skip(self))]
    async fn overwrite_counts(&mut self, tally: &ReactionTally) -> RepoResult<()> {
        sqlx::query(
            r"
            UPDATE definitions SET like_count = $2, dislike_count = $3 WHERE id = $1
            ",
        )
        .bind(tally.definition_id.into_inner())
        .bind(tally.likes)
        .bind(tally.dislikes)
        .execute(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn clear_all(&mut self) -> RepoResult<u64> {
        let deleted = sqlx::query("DELETE FROM definition_reactions")
            .execute(&mut *self.tx)
            .await
            .map_err(map_db_error)?
            .rows_affected();

        sqlx::query(
            r"
            UPDATE definitions SET like_count = 0, dislike_count = 0
            WHERE like_count <> 0 OR dislike_count <> 0
            ",
        )
        .execute(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query("UPDATE users SET points = 0 WHERE points <> 0")
            .execute(&mut *self.tx)
            .await
            .map_err(map_db_error)?;

        Ok(deleted)
    }

    async fn commit(self: Box<Self>) -> RepoResult<()> {
        self.tx.commit().await.map_err(map_db_error)
    }

    async fn rollback(self: Box<Self>) -> RepoResult<()> {
        self.tx.rollback().await.map_err(map_db_error)
    }
}
