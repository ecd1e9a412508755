//! Document store backends.

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use pluginsync_core::config::{AppConfig, StoreProvider};
use pluginsync_core::error::{AppError, ErrorKind};
use pluginsync_core::result::AppResult;
use pluginsync_core::traits::store::DocumentStore;
use pluginsync_core::types::filter::ID_FIELD;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

use crate::connection::DatabasePool;

/// Build the configured document store.
///
/// The postgres backend connects and runs migrations before returning.
pub async fn open(config: &AppConfig) -> AppResult<Arc<dyn DocumentStore>> {
    let store: Arc<dyn DocumentStore> = match config.store.provider {
        StoreProvider::Postgres => {
            let db = DatabasePool::connect_and_migrate(&config.database).await?;
            Arc::new(PgDocumentStore::new(db.pool().clone()))
        }
        StoreProvider::Memory => Arc::new(MemoryDocumentStore::new()),
    };

    info!(provider = store.provider_type(), "Document store ready");
    Ok(store)
}

/// Read the primary key from a document body and rewrite it in canonical
/// hyphenated lowercase form.
pub(crate) fn keyed_document(mut document: Value) -> AppResult<(Uuid, Value)> {
    let id = {
        let raw = document
            .get(ID_FIELD)
            .and_then(Value::as_str)
            .ok_or_else(|| AppError::invalid_identifier("document has no string 'id' field"))?;
        Uuid::parse_str(raw).map_err(|e| {
            AppError::with_source(
                ErrorKind::InvalidIdentifier,
                format!("document id '{raw}' is not a valid key"),
                e,
            )
        })?
    };

    if let Some(body) = document.as_object_mut() {
        body.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
    }
    Ok((id, document))
}
