//! Outbound ping transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use tracing::{debug, warn};

use pluginsync_core::config::SyncConfig;
use pluginsync_core::error::{AppError, ErrorKind};
use pluginsync_core::result::AppResult;

/// Sends the one-way notification request to a plugin.
#[async_trait]
pub trait PingTransport: Send + Sync + std::fmt::Debug + 'static {
    /// POST an empty body to `url` and return the response status.
    ///
    /// Only failures to complete the exchange are errors; any HTTP status,
    /// including 4xx/5xx, is returned as `Ok`.
    async fn post_empty(&self, url: &Url) -> AppResult<u16>;
}

/// [`PingTransport`] backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpPingTransport {
    client: reqwest::Client,
}

impl HttpPingTransport {
    /// Build the client from sync settings.
    pub fn new(config: &SyncConfig) -> AppResult<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.ping_timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder.build().map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Failed to build ping client: {e}"),
                e,
            )
        })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PingTransport for HttpPingTransport {
    async fn post_empty(&self, url: &Url) -> AppResult<u16> {
        let response = self.client.post(url.clone()).send().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Transport,
                format!("Ping to {url} failed: {e}"),
                e,
            )
        })?;

        let status = response.status();
        if status.is_success() {
            debug!(%url, status = status.as_u16(), "Plugin pinged");
        } else {
            warn!(%url, status = status.as_u16(), "Plugin answered ping with non-success status");
        }

        Ok(status.as_u16())
    }
}
