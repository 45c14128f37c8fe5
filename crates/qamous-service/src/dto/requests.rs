//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`; those with constraints also implement `Validate`.

use qamous_core::ReactionKind;
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Reaction Requests
// ============================================================================

/// Switch an existing reaction to the given kind
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SwitchReactionRequest {
    pub to: ReactionKind,
}

// ============================================================================
// Admin Requests
// ============================================================================

/// Recalculate counters; the configured batch size applies when omitted
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RecalculateRequest {
    #[validate(range(min = 1, max = 10000, message = "batch_size must be 1-10000"))]
    pub batch_size: Option<i64>,
}
