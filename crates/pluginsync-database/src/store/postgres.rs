//! PostgreSQL JSONB document store.

use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use pluginsync_core::error::{AppError, ErrorKind};
use pluginsync_core::result::AppResult;
use pluginsync_core::traits::store::DocumentStore;
use pluginsync_core::types::filter::DocumentFilter;

/// Document store over the `documents` table.
///
/// Lookups use JSONB containment (`body @> filter`), and updates merge the
/// given fields into the stored body with the `||` operator. A filter on
/// the primary key is matched against the `id` column, not the body text.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// Create a store over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    fn provider_type(&self) -> &str {
        "postgres"
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: &DocumentFilter,
    ) -> AppResult<Option<Value>> {
        let by_key = filter.id().and_then(|raw| Uuid::parse_str(raw).ok());

        let result = match by_key {
            Some(id) => {
                sqlx::query_scalar::<_, Value>(
                    "SELECT body FROM documents WHERE collection = $1 AND id = $2 AND body @> $3",
                )
                .bind(collection)
                .bind(id)
                .bind(filter.without_id().to_json())
                .fetch_optional(&self.pool)
                .await
            }
            None => {
                sqlx::query_scalar::<_, Value>(
                    "SELECT body FROM documents WHERE collection = $1 AND body @> $2 \
                     ORDER BY updated_at LIMIT 1",
                )
                .bind(collection)
                .bind(filter.to_json())
                .fetch_optional(&self.pool)
                .await
            }
        };

        result.map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to query {collection}"),
                e,
            )
        })
    }

    async fn update_one(
        &self,
        collection: &str,
        id: &Uuid,
        fields: Map<String, Value>,
    ) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE documents SET body = body || $3, updated_at = NOW() \
             WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .bind(Value::Object(fields))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::StoreWrite,
                format!("Failed to update {collection}/{id}"),
                e,
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "{collection}/{id} does not exist"
            )));
        }

        debug!(collection, %id, "Document updated");
        Ok(())
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }
}
