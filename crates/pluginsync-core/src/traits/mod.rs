//! Core traits defined in `pluginsync-core` and implemented by other crates.

pub mod store;

pub use store::DocumentStore;
