//! Document store backend configuration.

use serde::{Deserialize, Serialize};

/// Which document store backs organization and plugin records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreProvider {
    /// JSONB documents in PostgreSQL.
    #[default]
    Postgres,
    /// Process-local map; contents are lost on restart.
    Memory,
}

/// Document store configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Backend provider.
    #[serde(default)]
    pub provider: StoreProvider,
}
