//! Plugin documents and their message queue.

pub mod message;
pub mod model;

pub use message::QueuedMessage;
pub use model::{CALLBACK_URL_FIELD, PLUGIN_COLLECTION, Plugin};
