//! # pluginsync-service
//!
//! Synchronization of domain events from an organization to its installed
//! plugins. An event is appended to every plugin's queue, then every
//! plugin's callback URL is pinged so it can pull the new message.
//!
//! Services follow constructor injection. All dependencies are provided
//! at construction time via `Arc` references.

pub mod sync;
pub mod transport;

pub use sync::{
    FanOutReport, PingDispatcher, PluginResolver, QueueAppender, SyncOrchestrator, SyncSummary,
};
pub use transport::{HttpPingTransport, PingTransport};
