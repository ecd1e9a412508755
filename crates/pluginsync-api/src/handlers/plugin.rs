//! Plugin queue inspection.

use axum::Json;
use axum::extract::{Path, State};

use pluginsync_core::error::AppError;
use pluginsync_core::types::id::PluginId;

use crate::dto::response::{ApiResponse, QueueResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/plugins/{id}/queue
pub async fn get_queue(
    State(state): State<AppState>,
    Path(plugin_id): Path<String>,
) -> Result<Json<ApiResponse<QueueResponse>>, ApiError> {
    let id = PluginId::parse(&plugin_id)?;
    let plugin = state
        .plugin_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("plugin {id} does not exist")))?;

    Ok(Json(ApiResponse::ok(QueueResponse {
        plugin_id: plugin.id,
        queuepid: plugin.queue_sequence,
        messages: plugin.queue,
    })))
}
