//! In-memory document store using DashMap.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::{DashMap, DashSet};
use serde_json::{Map, Value};
use tracing::debug;
use uuid::Uuid;

use pluginsync_core::error::AppError;
use pluginsync_core::result::AppResult;
use pluginsync_core::traits::store::DocumentStore;
use pluginsync_core::types::filter::DocumentFilter;

use super::keyed_document;

/// Process-local document store.
///
/// Suitable for single-node deployments and tests. Cloning shares the
/// underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    documents: Arc<DashMap<(String, Uuid), Value>>,
    rejected: Arc<DashSet<Uuid>>,
    writes: Arc<AtomicU64>,
}

impl MemoryDocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a whole document. The key is read from its `id`
    /// field, which is stored back in canonical form.
    pub fn insert(&self, collection: &str, document: Value) -> AppResult<Uuid> {
        let (id, document) = keyed_document(document)?;
        self.documents.insert((collection.to_string(), id), document);
        Ok(id)
    }

    /// Snapshot of a stored document.
    pub fn get(&self, collection: &str, id: &Uuid) -> Option<Value> {
        self.documents
            .get(&(collection.to_string(), *id))
            .map(|entry| entry.value().clone())
    }

    /// Make every later `update_one` on `id` fail with `StoreWrite`.
    #[cfg(any(test, feature = "testing"))]
    pub fn reject_writes_to(&self, id: Uuid) {
        self.rejected.insert(id);
    }

    /// Number of successful `update_one` calls so far.
    #[cfg(any(test, feature = "testing"))]
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: &DocumentFilter,
    ) -> AppResult<Option<Value>> {
        if let Some(id) = filter.id().and_then(|raw| Uuid::parse_str(raw).ok()) {
            return Ok(self
                .get(collection, &id)
                .filter(|document| filter.without_id().matches(document)));
        }

        Ok(self
            .documents
            .iter()
            .filter(|entry| entry.key().0 == collection)
            .find(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone()))
    }

    async fn update_one(
        &self,
        collection: &str,
        id: &Uuid,
        fields: Map<String, Value>,
    ) -> AppResult<()> {
        if self.rejected.contains(id) {
            return Err(AppError::store_write(format!(
                "write to {collection}/{id} rejected"
            )));
        }

        let mut entry = self
            .documents
            .get_mut(&(collection.to_string(), *id))
            .ok_or_else(|| AppError::not_found(format!("{collection}/{id} does not exist")))?;

        let body = entry.value_mut().as_object_mut().ok_or_else(|| {
            AppError::store_write(format!("{collection}/{id} is not a JSON object"))
        })?;
        body.extend(fields);

        self.writes.fetch_add(1, Ordering::SeqCst);
        debug!(collection, %id, "Document updated");
        Ok(())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
