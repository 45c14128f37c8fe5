//! Admin handlers
//!
//! Counter repair and bulk reset. Restricted to users listed in `ADMIN_USER_IDS`.

use axum::{extract::State, Json};
use qamous_common::AppError;
use qamous_service::dto::{RecalculateRequest, RecalculateResponse, ResetResponse};
use qamous_service::MaintenanceService;

use crate::extractors::{AuthUser, OptionalValidatedJson};
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

fn require_admin(state: &AppState, auth: AuthUser) -> ApiResult<()> {
    if state.is_admin(auth.user_id) {
        Ok(())
    } else {
        tracing::warn!(user_id = %auth.user_id, "Non-admin attempted a maintenance operation");
        Err(ApiError::from(AppError::InsufficientPermissions))
    }
}

/// Recalculate every definition's counters from the ledger
///
/// POST /admin/reactions/recalculate
pub async fn recalculate(
    State(state): State<AppState>,
    auth: AuthUser,
    OptionalValidatedJson(body): OptionalValidatedJson<RecalculateRequest>,
) -> ApiResult<Json<RecalculateResponse>> {
    require_admin(&state, auth)?;

    let batch_size = body
        .and_then(|b| b.batch_size)
        .unwrap_or(state.config().reactions.recalculate_batch_size);

    let service = MaintenanceService::new(state.service_context());
    let report = service.recalculate_all(batch_size).await?;
    Ok(Json(report.into()))
}

/// Delete every reaction and zero all counters and points
///
/// POST /admin/reactions/reset
pub async fn reset(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ResetResponse>> {
    require_admin(&state, auth)?;

    let service = MaintenanceService::new(state.service_context());
    let reactions_deleted = service.reset_all(state.config().app.env).await?;
    Ok(Json(ResetResponse { reactions_deleted }))
}
