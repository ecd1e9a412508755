//! # pluginsync-core
//!
//! Core crate for PluginSync. Contains the document store trait,
//! configuration schemas, typed identifiers, document filters, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other PluginSync crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
