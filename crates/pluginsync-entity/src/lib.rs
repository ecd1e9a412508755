//! # pluginsync-entity
//!
//! Document models for PluginSync. Every struct in this crate is the
//! decoded shape of a record in the document store. All entities derive
//! `Debug`, `Clone`, `Serialize`, and `Deserialize`.

pub mod organization;
pub mod plugin;

pub use organization::{InstalledPlugin, Organization};
pub use plugin::{Plugin, QueuedMessage};
