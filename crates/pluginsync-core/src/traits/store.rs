//! Document store abstraction.

use async_trait::async_trait;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::result::AppResult;
use crate::types::filter::DocumentFilter;

/// A collection-oriented JSON document store.
///
/// Organization and plugin records live here. Implementations must treat
/// `update_one` as a shallow merge: each top-level key in `fields`
/// replaces the stored value for that key and all other keys are kept.
#[async_trait]
pub trait DocumentStore: Send + Sync + std::fmt::Debug + 'static {
    /// Human-readable backend name.
    fn provider_type(&self) -> &str;

    /// Return the first document in `collection` matching `filter`.
    async fn find_one(&self, collection: &str, filter: &DocumentFilter)
    -> AppResult<Option<Value>>;

    /// Merge `fields` into the document with primary key `id`.
    ///
    /// Fails with `NotFound` when no such document exists and with
    /// `StoreWrite` when the backend rejects the write.
    async fn update_one(
        &self,
        collection: &str,
        id: &Uuid,
        fields: Map<String, Value>,
    ) -> AppResult<()>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
