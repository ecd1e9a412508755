//! Organization documents.

pub mod model;

pub use model::{InstalledPlugin, ORGANIZATION_COLLECTION, Organization};
