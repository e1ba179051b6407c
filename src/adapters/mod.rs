// Adapters layer: concrete implementations for external systems (http, filesystem).

pub mod feed_client;
pub mod storage;

pub use feed_client::FeedClient;
pub use storage::{FileLock, LocalStorage};
