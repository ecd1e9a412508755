//! Plugin entity model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use pluginsync_core::error::{AppError, ErrorKind};

use super::message::QueuedMessage;

/// Collection holding plugin documents.
pub const PLUGIN_COLLECTION: &str = "plugins";

/// Stored field holding the plugin's callback URL.
pub const CALLBACK_URL_FIELD: &str = "sync_request_url";

/// An installed integration with its own message queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plugin {
    /// Unique plugin identifier.
    pub id: Uuid,
    /// URL pinged when new messages are queued. May be empty.
    #[serde(rename = "sync_request_url", default)]
    pub callback_url: String,
    /// Pending messages in delivery order.
    #[serde(default)]
    pub queue: Vec<QueuedMessage>,
    /// Id of the most recently appended message.
    #[serde(rename = "queuepid", default)]
    pub queue_sequence: i64,
}

impl Plugin {
    /// Decode a raw plugin document.
    pub fn from_document(document: Value) -> Result<Self, AppError> {
        serde_json::from_value(document).map_err(|e| {
            AppError::with_source(
                ErrorKind::Decode,
                format!("plugin document has unexpected shape: {e}"),
                e,
            )
        })
    }

    /// Append a message, assigning it the next sequence number.
    ///
    /// Fails with `Decode` and leaves the plugin untouched when the stored
    /// sequence is already at `i64::MAX`.
    pub fn enqueue(
        &mut self,
        event: impl Into<String>,
        message: Value,
    ) -> Result<&QueuedMessage, AppError> {
        let id = self.queue_sequence.checked_add(1).ok_or_else(|| {
            AppError::decode(format!("plugin {} message sequence exhausted", self.id))
        })?;

        self.queue_sequence = id;
        self.queue.push(QueuedMessage {
            id,
            event: event.into(),
            message,
        });
        Ok(&self.queue[self.queue.len() - 1])
    }

    /// The fields rewritten after an append: the queue and its counter.
    pub fn queue_fields(&self) -> Result<Map<String, Value>, AppError> {
        let mut fields = Map::new();
        fields.insert("queue".to_string(), serde_json::to_value(&self.queue)?);
        fields.insert("queuepid".to_string(), Value::from(self.queue_sequence));
        Ok(fields)
    }
}
