pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;
pub use config::AppConfig;

pub use adapters::{FeedClient, LocalStorage};
pub use self::core::{engine::UpdateEngine, pipeline::ReadmePipeline};
pub use domain::model::{NormalizedPhoto, PhotoRecord, UpdateReport};
pub use utils::error::{ErrorCategory, Result, UpdateError};
