//! # pluginsync-api
//!
//! HTTP API layer for PluginSync built on Axum.
//!
//! Exposes the organization sync trigger, plugin queue inspection and
//! health endpoints, together with middleware, DTOs and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, build_state_with_transport, run_server};
pub use error::ApiError;
pub use state::AppState;
