//! Organization-to-plugin synchronization.
//!
//! [`SyncOrchestrator::synchronize`] resolves the plugins installed in an
//! organization, appends the event to every plugin queue concurrently and,
//! when every append succeeded, pings every plugin concurrently.
//!
//! Each fan-out stage waits for all of its workers before reporting. A
//! failing worker never cancels its siblings. When several workers fail,
//! the error surfaced to the caller is the one belonging to the earliest
//! plugin in installation order; the complete list is kept in
//! [`FanOutReport`].

pub mod fanout;
pub mod orchestrator;
pub mod ping;
pub mod queue;
pub mod resolver;


pub use fanout::{FanOutReport, fan_out};
pub use orchestrator::{SyncOrchestrator, SyncSummary};
pub use ping::PingDispatcher;
pub use queue::QueueAppender;
pub use resolver::PluginResolver;
