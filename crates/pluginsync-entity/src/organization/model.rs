//! Organization entity model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Collection holding organization documents.
pub const ORGANIZATION_COLLECTION: &str = "organizations";

/// An organization and the plugins installed into it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    /// Unique organization identifier.
    pub id: Uuid,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Installed plugin descriptors, in installation order.
    #[serde(default)]
    pub plugins: Vec<InstalledPlugin>,
}

/// Descriptor of a plugin installed into an organization.
///
/// `plugin_id` is kept as stored. It is validated only when the plugin
/// record itself is looked up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstalledPlugin {
    /// Identifier of the plugin record.
    pub plugin_id: String,
    /// Any other installation attributes.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Organization {
    /// Identifiers of all installed plugins, in stored order.
    pub fn plugin_ids(&self) -> Vec<String> {
        self.plugins.iter().map(|p| p.plugin_id.clone()).collect()
    }
}
