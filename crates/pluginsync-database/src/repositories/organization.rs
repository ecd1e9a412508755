//! Organization repository implementation.

use std::sync::Arc;

use pluginsync_core::error::{AppError, ErrorKind};
use pluginsync_core::result::AppResult;
use pluginsync_core::traits::store::DocumentStore;
use pluginsync_core::types::filter::DocumentFilter;
use pluginsync_core::types::id::OrganizationId;
use pluginsync_entity::organization::{ORGANIZATION_COLLECTION, Organization};

/// Read access to organization documents.
#[derive(Debug, Clone)]
pub struct OrganizationRepository {
    store: Arc<dyn DocumentStore>,
}

impl OrganizationRepository {
    /// Create a new organization repository.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Find an organization by id.
    pub async fn find_by_id(&self, id: &OrganizationId) -> AppResult<Option<Organization>> {
        let Some(document) = self
            .store
            .find_one(ORGANIZATION_COLLECTION, &DocumentFilter::by_id(id.as_uuid()))
            .await?
        else {
            return Ok(None);
        };

        serde_json::from_value(document).map(Some).map_err(|e| {
            AppError::with_source(
                ErrorKind::Decode,
                format!("organization {id} has unexpected shape: {e}"),
                e,
            )
        })
    }
}
