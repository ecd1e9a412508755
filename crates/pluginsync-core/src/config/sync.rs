//! Plugin synchronization configuration.

use serde::{Deserialize, Serialize};

/// Settings for the organization-to-plugin fan-out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Maximum number of plugin workers running at once per fan-out
    /// stage (0 = one worker per plugin, no cap).
    #[serde(default)]
    pub max_concurrency: usize,
    /// Timeout applied to each plugin ping. Unset leaves the HTTP
    /// client's default in place.
    #[serde(default)]
    pub ping_timeout_seconds: Option<u64>,
    /// `User-Agent` header sent with pings.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 0,
            ping_timeout_seconds: None,
            user_agent: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    concat!("pluginsync/", env!("CARGO_PKG_VERSION")).to_string()
}
