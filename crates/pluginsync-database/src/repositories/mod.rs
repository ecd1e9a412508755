//! Typed repositories over the document store.

pub mod organization;
pub mod plugin;

pub use organization::OrganizationRepository;
pub use plugin::PluginRepository;
