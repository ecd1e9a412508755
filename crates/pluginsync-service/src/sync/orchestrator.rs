//! The synchronize operation: resolve, enqueue everywhere, ping everywhere.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};

use pluginsync_core::config::SyncConfig;
use pluginsync_core::result::AppResult;

use super::fanout::{FanOutReport, fan_out};
use super::ping::PingDispatcher;
use super::queue::QueueAppender;
use super::resolver::PluginResolver;

/// What a successful synchronize did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncSummary {
    /// Plugins the event was delivered to, in installation order.
    pub plugins: Vec<String>,
    /// Number of queues appended to.
    pub queued: usize,
    /// Number of plugins pinged.
    pub pinged: usize,
}

/// Delivers one organization event to every installed plugin.
#[derive(Debug)]
pub struct SyncOrchestrator {
    resolver: PluginResolver,
    appender: Arc<QueueAppender>,
    dispatcher: Arc<PingDispatcher>,
    max_concurrency: usize,
}

impl SyncOrchestrator {
    /// Creates a new orchestrator.
    pub fn new(
        resolver: PluginResolver,
        appender: Arc<QueueAppender>,
        dispatcher: Arc<PingDispatcher>,
        config: &SyncConfig,
    ) -> Self {
        Self {
            resolver,
            appender,
            dispatcher,
            max_concurrency: config.max_concurrency,
        }
    }

    /// Queue `event` with `payload` for every plugin installed in the
    /// organization, then ping each of them.
    ///
    /// Pings start only after every append has finished, and only when all
    /// of them succeeded. On failure the error of the earliest failing
    /// plugin in installation order is returned.
    pub async fn synchronize(
        &self,
        organization_id: &str,
        event: &str,
        payload: Value,
    ) -> AppResult<SyncSummary> {
        let plugins = self.resolver.installed_plugins(organization_id).await?;
        if plugins.is_empty() {
            info!(organization_id, event, "No plugins installed, nothing to sync");
            return Ok(SyncSummary {
                plugins,
                queued: 0,
                pinged: 0,
            });
        }

        let queued = self
            .enqueue_all(&plugins, event, Arc::new(payload))
            .await
            .into_result()
            .inspect_err(|e| {
                error!(organization_id, event, error = %e, "Queueing failed, pings skipped");
            })?;

        let pinged = self.ping_all(&plugins).await.into_result()?;

        info!(organization_id, event, plugins = plugins.len(), "Organization synchronized");
        Ok(SyncSummary {
            plugins,
            queued,
            pinged,
        })
    }

    async fn enqueue_all(
        &self,
        plugins: &[String],
        event: &str,
        payload: Arc<Value>,
    ) -> FanOutReport {
        let event: Arc<str> = Arc::from(event);
        let report = fan_out(plugins, self.max_concurrency, |plugin_id| {
            let appender = Arc::clone(&self.appender);
            let event = Arc::clone(&event);
            let payload = Arc::clone(&payload);
            async move {
                appender
                    .append(&plugin_id, &event, &payload)
                    .await
                    .map(|_| ())
            }
        })
        .await;

        for (plugin_id, err) in &report.failures {
            warn!(plugin_id = %plugin_id, error = %err, "Failed to queue message");
        }
        report
    }

    async fn ping_all(&self, plugins: &[String]) -> FanOutReport {
        let report = fan_out(plugins, self.max_concurrency, |plugin_id| {
            let dispatcher = Arc::clone(&self.dispatcher);
            async move { dispatcher.ping(&plugin_id).await }
        })
        .await;

        for (plugin_id, err) in &report.failures {
            warn!(plugin_id = %plugin_id, error = %err, "Failed to ping plugin");
        }
        report
    }
}
