//! Definition database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for definitions table
#[derive(Debug, Clone, FromRow)]
pub struct DefinitionModel {
    pub id: i64,
    pub word_id: i64,
    pub user_id: i64,
    pub definition: String,
    pub example: Option<String>,
    pub is_arabic: bool,
    pub like_count: i64,
    pub dislike_count: i64,
    pub created_at: DateTime<Utc>,
}
