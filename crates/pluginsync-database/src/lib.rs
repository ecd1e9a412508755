//! # pluginsync-database
//!
//! Document store backends (PostgreSQL JSONB and in-memory) and the typed
//! organization and plugin repositories built on top of them.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::{MemoryDocumentStore, PgDocumentStore};
