//! Reaction entity <-> model mapper

use qamous_core::entities::{Reaction, ReactionTally};
use qamous_core::value_objects::{DefinitionId, ReactionId, UserId};

use crate::models::{ReactionModel, ReactionTallyModel};

/// Convert ReactionModel to Reaction entity
impl From<ReactionModel> for Reaction {
    fn from(model: ReactionModel) -> Self {
        Reaction {
            id: ReactionId::new(model.id),
            definition_id: DefinitionId::new(model.definition_id),
            user_id: UserId::new(model.user_id),
            liked: model.liked,
            created_at: model.created_at,
        }
    }
}

impl From<ReactionTallyModel> for ReactionTally {
    fn from(model: ReactionTallyModel) -> Self {
        ReactionTally {
            definition_id: DefinitionId::new(model.definition_id),
            likes: model.likes,
            dislikes: model.dislikes,
        }
    }
}
