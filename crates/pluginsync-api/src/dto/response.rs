//! Response DTOs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pluginsync_entity::plugin::QueuedMessage;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` when the process answers.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Seconds since startup.
    pub uptime_seconds: i64,
}

/// Health response including the document store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    /// `"ok"` or `"degraded"`.
    pub status: String,
    /// Store backend name.
    pub store_provider: String,
    /// `"connected"` or `"unavailable"`.
    pub store: String,
}

/// Result of a sync trigger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncResponse {
    /// Organization whose plugins were synchronized.
    pub organization_id: String,
    /// Event tag that was queued.
    pub event: String,
    /// Plugins that received the event.
    pub plugins: Vec<String>,
    /// Queues appended to.
    pub queued: usize,
    /// Plugins pinged.
    pub pinged: usize,
}

/// A plugin's pending messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueResponse {
    /// Plugin id.
    pub plugin_id: Uuid,
    /// Id of the most recently queued message.
    pub queuepid: i64,
    /// Pending messages in order.
    pub messages: Vec<QueuedMessage>,
}
