//! Queued plugin message.

use serde::{Deserialize, Serialize};

/// A message waiting in a plugin's queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueuedMessage {
    /// Sequence number assigned on append.
    pub id: i64,
    /// Event tag, e.g. `"msg.created"`.
    pub event: String,
    /// Caller payload, stored as given.
    #[serde(default)]
    pub message: serde_json::Value,
}
