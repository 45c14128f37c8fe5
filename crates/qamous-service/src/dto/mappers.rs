//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities and service results to response DTOs.

use qamous_core::entities::{Reaction, ReactionTally};

use super::responses::{
    ReactionItemResponse, ReactionResponse, RecalculateResponse, RecalculatedCountsResponse,
};
use crate::services::{RecalculationReport, ReactionOutcome, ServiceError};

// ============================================================================
// Reaction Mappers
// ============================================================================

impl From<&ReactionOutcome> for ReactionResponse {
    fn from(outcome: &ReactionOutcome) -> Self {
        Self::ok(outcome.message())
    }
}

impl From<ReactionOutcome> for ReactionResponse {
    fn from(outcome: ReactionOutcome) -> Self {
        Self::from(&outcome)
    }
}

impl From<&ServiceError> for ReactionResponse {
    fn from(err: &ServiceError) -> Self {
        Self::failed(err.to_string())
    }
}

impl From<&Reaction> for ReactionItemResponse {
    fn from(reaction: &Reaction) -> Self {
        Self {
            id: reaction.id,
            definition_id: reaction.definition_id,
            user_id: reaction.user_id,
            kind: reaction.kind(),
            created_at: reaction.created_at,
        }
    }
}

impl From<Reaction> for ReactionItemResponse {
    fn from(reaction: Reaction) -> Self {
        Self::from(&reaction)
    }
}

// ============================================================================
// Admin Mappers
// ============================================================================

impl From<&ReactionTally> for RecalculatedCountsResponse {
    fn from(tally: &ReactionTally) -> Self {
        Self {
            definition_id: tally.definition_id,
            likes: tally.likes,
            dislikes: tally.dislikes,
        }
    }
}

impl From<RecalculationReport> for RecalculateResponse {
    fn from(report: RecalculationReport) -> Self {
        Self {
            updated: report.definitions.iter().map(Into::into).collect(),
            failed_batches: report.failed_batches,
        }
    }
}
