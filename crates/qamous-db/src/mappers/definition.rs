//! Definition entity <-> model mapper

use qamous_core::entities::Definition;
use qamous_core::value_objects::{DefinitionId, UserId};

use crate::models::DefinitionModel;

/// Convert DefinitionModel to Definition entity
impl From<DefinitionModel> for Definition {
    fn from(model: DefinitionModel) -> Self {
        Definition {
            id: DefinitionId::new(model.id),
            word_id: model.word_id,
            author_id: UserId::new(model.user_id),
            body: model.definition,
            example: model.example,
            is_arabic: model.is_arabic,
            like_count: model.like_count,
            dislike_count: model.dislike_count,
            created_at: model.created_at,
        }
    }
}
