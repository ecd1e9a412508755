//! Organization sync trigger.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use tracing::info;
use validator::Validate;

use pluginsync_core::error::AppError;

use crate::dto::request::SyncRequest;
use crate::dto::response::{ApiResponse, SyncResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/organizations/{id}/sync
///
/// Queues the event for every plugin installed in the organization and
/// pings them. Responds only after both stages have finished.
pub async fn sync_organization(
    State(state): State<AppState>,
    Path(organization_id): Path<String>,
    body: Result<Json<SyncRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<SyncResponse>>, ApiError> {
    let Json(req) = body.map_err(|e| AppError::validation(e.body_text()))?;
    req.validate()
        .map_err(|e| AppError::validation(format!("Invalid sync request: {e}")))?;

    info!(organization_id = %organization_id, event = %req.event, "Sync requested");

    let summary = state
        .orchestrator
        .synchronize(&organization_id, &req.event, req.message)
        .await?;

    Ok(Json(ApiResponse::ok(SyncResponse {
        organization_id,
        event: req.event,
        plugins: summary.plugins,
        queued: summary.queued,
        pinged: summary.pinged,
    })))
}
