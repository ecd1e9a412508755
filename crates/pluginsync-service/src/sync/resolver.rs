//! Organization to installed-plugin resolution.

use std::sync::Arc;

use tracing::debug;

use pluginsync_core::error::AppError;
use pluginsync_core::result::AppResult;
use pluginsync_core::types::id::OrganizationId;
use pluginsync_database::repositories::OrganizationRepository;

/// Looks up which plugins an organization has installed.
#[derive(Debug, Clone)]
pub struct PluginResolver {
    org_repo: Arc<OrganizationRepository>,
}

impl PluginResolver {
    /// Creates a new resolver.
    pub fn new(org_repo: Arc<OrganizationRepository>) -> Self {
        Self { org_repo }
    }

    /// Plugin ids installed in the organization, in stored order.
    pub async fn installed_plugins(&self, organization_id: &str) -> AppResult<Vec<String>> {
        let id = OrganizationId::parse(organization_id)?;

        let organization = self
            .org_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("organization {id} does not exist")))?;

        let plugins = organization.plugin_ids();
        debug!(organization_id = %id, count = plugins.len(), "Resolved installed plugins");
        Ok(plugins)
    }
}
