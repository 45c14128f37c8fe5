//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{admin, health, reactions};
use crate::state::AppState;

/// Create the main API router (health routes are mounted separately to bypass rate limiting)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(reaction_routes())
        .merge(admin_routes())
}

/// Reaction routes
fn reaction_routes() -> Router<AppState> {
    Router::new()
        // Mutations
        .route("/reactions/:definition_id/like", post(reactions::like))
        .route("/reactions/:definition_id/dislike", post(reactions::dislike))
        .route("/reactions/:definition_id/switch", post(reactions::switch))
        .route("/reactions/:definition_id/unlike", post(reactions::unlike))
        .route("/reactions/:definition_id/undislike", post(reactions::undislike))
        // Queries
        .route("/reactions/:definition_id/counts", get(reactions::get_counts))
        .route(
            "/reactions/:definition_id/likes-dislikes",
            get(reactions::get_reactions),
        )
        .route("/reactions/:definition_id/likes", get(reactions::get_likes))
        .route("/reactions/:definition_id/dislikes", get(reactions::get_dislikes))
        .route("/reactions/:definition_id/me", get(reactions::get_own_reaction))
}

/// Maintenance routes
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/reactions/recalculate", post(admin::recalculate))
        .route("/admin/reactions/reset", post(admin::reset))
}
