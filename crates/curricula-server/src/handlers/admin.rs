//! Diagnostic handlers.

use axum::extract::State;
use axum::Json;

use curricula_core::ConsistencyReport;

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/admin/consistency`
pub async fn consistency(
    State(state): State<AppState>,
) -> Result<Json<ConsistencyReport>, ApiError> {
    let report = state.call(|svc| svc.audit()).await?;
    Ok(Json(report))
}
