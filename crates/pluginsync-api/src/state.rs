//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use pluginsync_core::config::AppConfig;
use pluginsync_core::traits::store::DocumentStore;
use pluginsync_database::repositories::PluginRepository;
use pluginsync_service::SyncOrchestrator;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Document store backing every repository
    pub store: Arc<dyn DocumentStore>,
    /// Plugin records, for queue inspection
    pub plugin_repo: Arc<PluginRepository>,
    /// Organization-to-plugin fan-out
    pub orchestrator: Arc<SyncOrchestrator>,
    /// Process start time
    pub started_at: DateTime<Utc>,
}
