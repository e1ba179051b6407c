use crate::domain::model::{Extracted, NormalizedPhoto, UpdateReport};
use crate::domain::settings::{FeedEndpoints, ReadmeTemplate};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    /// Held for the duration of a write; dropping it releases the target.
    type Lock: Send;

    /// Confirms the target exists and can be overwritten, without reading it.
    fn check_target(&self, path: &str) -> impl std::future::Future<Output = Result<()>> + Send;
    fn lock(&self, path: &str) -> impl std::future::Future<Output = Result<Self::Lock>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn user_id(&self) -> Option<&str>;
    fn image_id(&self) -> Option<&str>;
    fn readme_path(&self) -> &str;
    fn endpoints(&self) -> &FeedEndpoints;
    fn request_timeout(&self) -> Duration;
    fn template(&self) -> &ReadmeTemplate;
    fn dry_run(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Extracted>;
    async fn transform(&self, data: Extracted) -> Result<NormalizedPhoto>;
    async fn load(&self, photo: NormalizedPhoto) -> Result<UpdateReport>;
}
