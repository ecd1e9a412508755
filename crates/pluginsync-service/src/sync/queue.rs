//! Appending events to a plugin's message queue.

use std::sync::Arc;

use dashmap::DashMap;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::debug;

use pluginsync_core::error::AppError;
use pluginsync_core::result::AppResult;
use pluginsync_core::types::id::PluginId;
use pluginsync_database::repositories::PluginRepository;
use pluginsync_entity::plugin::QueuedMessage;

/// Appends messages to plugin queues.
///
/// Sequence assignment is a read-modify-write on the plugin document. A
/// per-plugin lock is held for the whole cycle so that concurrent appends
/// to one plugin through the same appender get distinct, contiguous ids.
/// Writers in other processes are not covered by the lock.
#[derive(Debug)]
pub struct QueueAppender {
    plugin_repo: Arc<PluginRepository>,
    locks: DashMap<PluginId, Arc<Mutex<()>>>,
}

impl QueueAppender {
    /// Creates a new appender.
    pub fn new(plugin_repo: Arc<PluginRepository>) -> Self {
        Self {
            plugin_repo,
            locks: DashMap::new(),
        }
    }

    /// Append `event` with `payload` to the plugin's queue and return the
    /// stored message.
    pub async fn append(
        &self,
        plugin_id: &str,
        event: &str,
        payload: &Value,
    ) -> AppResult<QueuedMessage> {
        let id = PluginId::parse(plugin_id)?;

        let lock = self.lock_for(id);
        let result = {
            let _guard = lock.lock().await;
            self.append_locked(id, event, payload).await
        };
        drop(lock);
        self.release(id);

        result
    }

    async fn append_locked(
        &self,
        id: PluginId,
        event: &str,
        payload: &Value,
    ) -> AppResult<QueuedMessage> {
        let mut plugin = self
            .plugin_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("plugin {id} does not exist")))?;

        let message = plugin.enqueue(event, payload.clone())?.clone();
        self.plugin_repo.save_queue(&plugin).await?;

        debug!(plugin_id = %id, message_id = message.id, event, "Message queued");
        Ok(message)
    }

    fn lock_for(&self, id: PluginId) -> Arc<Mutex<()>> {
        Arc::clone(self.locks.entry(id).or_default().value())
    }

    /// Drop the plugin's lock once no append holds or waits on it.
    ///
    /// Clones are only taken under the map's shard lock, so a count of one
    /// here means no other task can still reach this mutex.
    fn release(&self, id: PluginId) {
        self.locks.remove_if(&id, |_, lock| Arc::strong_count(lock) == 1);
    }

    #[cfg(test)]
    fn tracked_locks(&self) -> usize {
        self.locks.len()
    }
}
