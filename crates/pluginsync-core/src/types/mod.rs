//! Core type definitions used across the PluginSync workspace.

pub mod filter;
pub mod id;

pub use filter::DocumentFilter;
pub use id::*;
