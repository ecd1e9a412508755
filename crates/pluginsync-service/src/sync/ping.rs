//! Plugin ping dispatch.

use std::sync::Arc;

use reqwest::Url;
use serde_json::Value;
use tracing::debug;

use pluginsync_core::error::{AppError, ErrorKind};
use pluginsync_core::result::AppResult;
use pluginsync_core::types::id::PluginId;
use pluginsync_database::repositories::PluginRepository;
use pluginsync_entity::plugin::CALLBACK_URL_FIELD;

use crate::transport::PingTransport;

/// Tells plugins that new messages are waiting in their queues.
#[derive(Debug)]
pub struct PingDispatcher {
    plugin_repo: Arc<PluginRepository>,
    transport: Arc<dyn PingTransport>,
}

impl PingDispatcher {
    /// Creates a new dispatcher.
    pub fn new(plugin_repo: Arc<PluginRepository>, transport: Arc<dyn PingTransport>) -> Self {
        Self {
            plugin_repo,
            transport,
        }
    }

    /// Send an empty POST to the plugin's callback URL.
    ///
    /// The response status and body are ignored. Only a failure to look up
    /// the plugin, a missing or unusable URL, or a failed exchange is an
    /// error.
    pub async fn ping(&self, plugin_id: &str) -> AppResult<()> {
        let id = PluginId::parse(plugin_id)?;

        let document = self
            .plugin_repo
            .find_document(&id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("plugin {id} does not exist")))?;

        let url = callback_url(&id, &document)?;
        let status = self.transport.post_empty(&url).await?;

        debug!(plugin_id = %id, %url, status, "Ping delivered");
        Ok(())
    }
}

/// Extract and validate the callback URL of a plugin document.
///
/// Only the URL field is read, so a plugin whose queue fails to decode can
/// still be pinged.
fn callback_url(id: &PluginId, document: &Value) -> AppResult<Url> {
    let raw = match document.get(CALLBACK_URL_FIELD) {
        None | Some(Value::Null) => "",
        Some(Value::String(s)) => s.trim(),
        Some(other) => {
            return Err(AppError::decode(format!(
                "plugin {id} has a non-string {CALLBACK_URL_FIELD}: {other}"
            )));
        }
    };

    if raw.is_empty() {
        return Err(AppError::no_endpoint(format!(
            "plugin {id} has no callback URL"
        )));
    }

    let url = Url::parse(raw).map_err(|e| {
        AppError::with_source(
            ErrorKind::InvalidUrl,
            format!("plugin {id} callback URL '{raw}' is invalid"),
            e,
        )
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(AppError::invalid_url(format!(
            "plugin {id} callback URL uses unsupported scheme '{scheme}'"
        ))),
    }
}
