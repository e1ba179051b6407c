pub mod engine;
pub mod pipeline;
pub mod render;
pub mod selector;

pub use crate::domain::model::{Extracted, NormalizedPhoto, PhotoRecord, UpdateReport};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
