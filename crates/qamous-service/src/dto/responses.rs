//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use chrono::{DateTime, Utc};
use qamous_core::{DefinitionId, ReactionId, ReactionKind, ReactionState, UserId};
use serde::Serialize;

// ============================================================================
// Reaction Responses
// ============================================================================

/// Outcome of a reaction mutation, returned for both success and failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReactionResponse {
    pub success: bool,
    pub message: String,
}

impl ReactionResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Denormalized counters of a definition
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReactionCountsResponse {
    pub definition_id: DefinitionId,
    pub like_count: i64,
    pub dislike_count: i64,
}

/// One ledger row
#[derive(Debug, Clone, Serialize)]
pub struct ReactionItemResponse {
    pub id: ReactionId,
    pub definition_id: DefinitionId,
    pub user_id: UserId,
    pub kind: ReactionKind,
    pub created_at: DateTime<Utc>,
}

/// Ledger-derived count of one reaction kind
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CountResponse {
    pub definition_id: DefinitionId,
    pub kind: ReactionKind,
    pub count: i64,
}

/// The caller's own reaction on a definition
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReactionStateResponse {
    pub definition_id: DefinitionId,
    pub state: ReactionState,
}

// ============================================================================
// Admin Responses
// ============================================================================

/// Counters written for one definition
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RecalculatedCountsResponse {
    pub definition_id: DefinitionId,
    pub likes: i64,
    pub dislikes: i64,
}

/// Result of a recalculation pass
#[derive(Debug, Clone, Serialize)]
pub struct RecalculateResponse {
    pub updated: Vec<RecalculatedCountsResponse>,
    pub failed_batches: usize,
}

/// Result of a bulk reset
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ResetResponse {
    pub reactions_deleted: u64,
}

// ============================================================================
// Health Check Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
