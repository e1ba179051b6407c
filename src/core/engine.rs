use crate::core::{Pipeline, UpdateReport};
use crate::utils::error::Result;

/// Runs a pipeline once: fetch, select, write.
pub struct UpdateEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> UpdateEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<UpdateReport> {
        tracing::info!("Starting README update");

        tracing::debug!("Fetching photo metadata");
        let extracted = self.pipeline.extract().await?;

        tracing::debug!("Selecting photo");
        let photo = self.pipeline.transform(extracted).await?;

        tracing::debug!("Rendering README");
        let report = self.pipeline.load(photo).await?;

        if report.written {
            tracing::info!("README saved to: {}", report.path);
        }
        Ok(report)
    }
}
