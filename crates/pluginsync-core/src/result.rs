//! Convenience result type alias for PluginSync.

use crate::error::AppError;

/// A specialized `Result` type for PluginSync operations.
pub type AppResult<T> = Result<T, AppError>;
