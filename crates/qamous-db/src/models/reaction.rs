//! Reaction database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for definition_reactions table
#[derive(Debug, Clone, FromRow)]
pub struct ReactionModel {
    pub id: i64,
    pub definition_id: i64,
    pub user_id: i64,
    pub liked: bool,
    pub created_at: DateTime<Utc>,
}

/// Ledger counts per definition (from aggregate query)
#[derive(Debug, Clone, FromRow)]
pub struct ReactionTallyModel {
    pub definition_id: i64,
    pub likes: i64,
    pub dislikes: i64,
}
