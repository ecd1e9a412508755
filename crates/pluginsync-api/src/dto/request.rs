//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

/// Body of `POST /api/organizations/{id}/sync`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SyncRequest {
    /// Event tag recorded on every queued message.
    #[validate(length(min = 1, message = "event is required"))]
    pub event: String,
    /// Arbitrary payload, stored unchanged.
    #[serde(default)]
    pub message: Value,
}
