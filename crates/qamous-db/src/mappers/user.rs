//! User entity <-> model mapper

use qamous_core::entities::User;
use qamous_core::value_objects::UserId;

use crate::models::UserModel;

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: UserId::new(model.id),
            username: model.username,
            points: model.points,
            created_at: model.created_at,
        }
    }
}
