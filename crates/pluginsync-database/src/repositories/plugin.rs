//! Plugin repository implementation.

use std::sync::Arc;

use serde_json::Value;

use pluginsync_core::result::AppResult;
use pluginsync_core::traits::store::DocumentStore;
use pluginsync_core::types::filter::DocumentFilter;
use pluginsync_core::types::id::PluginId;
use pluginsync_entity::plugin::{PLUGIN_COLLECTION, Plugin};

/// Access to plugin documents and their queues.
#[derive(Debug, Clone)]
pub struct PluginRepository {
    store: Arc<dyn DocumentStore>,
}

impl PluginRepository {
    /// Create a new plugin repository.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Fetch the raw plugin document without decoding it.
    pub async fn find_document(&self, id: &PluginId) -> AppResult<Option<Value>> {
        self.store
            .find_one(PLUGIN_COLLECTION, &DocumentFilter::by_id(id.as_uuid()))
            .await
    }

    /// Fetch and decode a plugin.
    pub async fn find_by_id(&self, id: &PluginId) -> AppResult<Option<Plugin>> {
        self.find_document(id)
            .await?
            .map(Plugin::from_document)
            .transpose()
    }

    /// Persist the plugin's queue and sequence counter in one update.
    pub async fn save_queue(&self, plugin: &Plugin) -> AppResult<()> {
        self.store
            .update_one(PLUGIN_COLLECTION, &plugin.id, plugin.queue_fields()?)
            .await
    }
}
