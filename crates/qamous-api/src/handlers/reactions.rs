//! Reaction handlers
//!
//! Likes and dislikes on definitions. Mutations always answer with a
//! `ReactionResponse`, on failure too.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use qamous_core::ReactionKind;
use qamous_service::dto::{
    CountResponse, ReactionCountsResponse, ReactionItemResponse, ReactionResponse,
    ReactionStateResponse, SwitchReactionRequest,
};
use qamous_service::ReactionService;

use crate::extractors::{DefinitionPath, OptionalAuthUser};
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

// ============================================================================
// Mutations
// ============================================================================

/// Like a definition
///
/// POST /reactions/{definition_id}/like
pub async fn like(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Path(path): Path<DefinitionPath>,
) -> ApiResult<Json<ReactionResponse>> {
    let definition_id = path.definition_id().map_err(ApiError::into_reaction)?;

    let service = ReactionService::new(state.service_context());
    let outcome = service
        .like(auth.user_id(), definition_id)
        .await
        .map_err(ApiError::reaction)?;
    Ok(Json(outcome.into()))
}

/// Dislike a definition
///
/// POST /reactions/{definition_id}/dislike
pub async fn dislike(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Path(path): Path<DefinitionPath>,
) -> ApiResult<Json<ReactionResponse>> {
    let definition_id = path.definition_id().map_err(ApiError::into_reaction)?;

    let service = ReactionService::new(state.service_context());
    let outcome = service
        .dislike(auth.user_id(), definition_id)
        .await
        .map_err(ApiError::reaction)?;
    Ok(Json(outcome.into()))
}

/// Switch an existing reaction
///
/// POST /reactions/{definition_id}/switch
pub async fn switch(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Path(path): Path<DefinitionPath>,
    body: Result<Json<SwitchReactionRequest>, JsonRejection>,
) -> ApiResult<Json<ReactionResponse>> {
    let definition_id = path.definition_id().map_err(ApiError::into_reaction)?;
    let Json(request) = body.map_err(|e| ApiError::from(e).into_reaction())?;

    let service = ReactionService::new(state.service_context());
    let outcome = service
        .switch(auth.user_id(), definition_id, request.to)
        .await
        .map_err(ApiError::reaction)?;
    Ok(Json(outcome.into()))
}

/// Remove a like
///
/// POST /reactions/{definition_id}/unlike
pub async fn unlike(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Path(path): Path<DefinitionPath>,
) -> ApiResult<Json<ReactionResponse>> {
    let definition_id = path.definition_id().map_err(ApiError::into_reaction)?;

    let service = ReactionService::new(state.service_context());
    let outcome = service
        .unlike(auth.user_id(), definition_id)
        .await
        .map_err(ApiError::reaction)?;
    Ok(Json(outcome.into()))
}

/// Remove a dislike
///
/// POST /reactions/{definition_id}/undislike
pub async fn undislike(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Path(path): Path<DefinitionPath>,
) -> ApiResult<Json<ReactionResponse>> {
    let definition_id = path.definition_id().map_err(ApiError::into_reaction)?;

    let service = ReactionService::new(state.service_context());
    let outcome = service
        .undislike(auth.user_id(), definition_id)
        .await
        .map_err(ApiError::reaction)?;
    Ok(Json(outcome.into()))
}

// ============================================================================
// Queries
// ============================================================================

/// Denormalized counters
///
/// GET /reactions/{definition_id}/counts
pub async fn get_counts(
    State(state): State<AppState>,
    Path(path): Path<DefinitionPath>,
) -> ApiResult<Json<ReactionCountsResponse>> {
    let definition_id = path.definition_id()?;

    let service = ReactionService::new(state.service_context());
    let counts = service.counts(definition_id).await?;
    Ok(Json(ReactionCountsResponse {
        definition_id,
        like_count: counts.like_count,
        dislike_count: counts.dislike_count,
    }))
}

/// Every reaction on a definition
///
/// GET /reactions/{definition_id}/likes-dislikes
pub async fn get_reactions(
    State(state): State<AppState>,
    Path(path): Path<DefinitionPath>,
) -> ApiResult<Json<Vec<ReactionItemResponse>>> {
    let definition_id = path.definition_id()?;

    let service = ReactionService::new(state.service_context());
    let reactions = service.list_reactions(definition_id).await?;
    Ok(Json(reactions.iter().map(Into::into).collect()))
}

/// Number of likes in the ledger
///
/// GET /reactions/{definition_id}/likes
pub async fn get_likes(
    State(state): State<AppState>,
    Path(path): Path<DefinitionPath>,
) -> ApiResult<Json<CountResponse>> {
    let definition_id = path.definition_id()?;

    let service = ReactionService::new(state.service_context());
    let count = service.count_likes(definition_id).await?;
    Ok(Json(CountResponse {
        definition_id,
        kind: ReactionKind::Like,
        count,
    }))
}

/// Number of dislikes in the ledger
///
/// GET /reactions/{definition_id}/dislikes
pub async fn get_dislikes(
    State(state): State<AppState>,
    Path(path): Path<DefinitionPath>,
) -> ApiResult<Json<CountResponse>> {
    let definition_id = path.definition_id()?;

    let service = ReactionService::new(state.service_context());
    let count = service.count_dislikes(definition_id).await?;
    Ok(Json(CountResponse {
        definition_id,
        kind: ReactionKind::Dislike,
        count,
    }))
}

/// The caller's own reaction
///
/// GET /reactions/{definition_id}/me
pub async fn get_own_reaction(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Path(path): Path<DefinitionPath>,
) -> ApiResult<Json<ReactionStateResponse>> {
    let definition_id = path.definition_id()?;

    let service = ReactionService::new(state.service_context());
    let reaction_state = service.current_state(auth.user_id(), definition_id).await?;
    Ok(Json(ReactionStateResponse {
        definition_id,
        state: reaction_state,
    }))
}
