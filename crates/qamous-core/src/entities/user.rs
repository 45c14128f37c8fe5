//! User entity - a dictionary contributor

use chrono::{DateTime, Utc};

use crate::value_objects::UserId;

/// User entity
///
/// `points` is reputation earned from reactions other users leave on this user's
/// definitions. It may be negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub points: i64,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with zero points
    pub fn new(id: UserId, username: String) -> Self {
        Self {
            id,
            username,
            points: 0,
            created_at: Utc::now(),
        }
    }
}
