use crate::adapters::FeedClient;
use crate::core::render::render;
use crate::core::selector::{select_by_id, select_random};
use crate::core::{ConfigProvider, Extracted, NormalizedPhoto, Pipeline, Storage, UpdateReport};
use crate::utils::error::{Result, UpdateError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Mutex;

/// Feed → selection → README pipeline.
pub struct ReadmePipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
    pub(crate) client: FeedClient,
    rng: Mutex<StdRng>,
}

impl<S: Storage, C: ConfigProvider> ReadmePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        Self::with_rng(storage, config, StdRng::from_entropy())
    }

    pub fn with_rng(storage: S, config: C, rng: StdRng) -> Result<Self> {
        let client = FeedClient::new(config.endpoints().clone(), config.request_timeout())?;
        Ok(Self {
            storage,
            config,
            client,
            rng: Mutex::new(rng),
        })
    }

    fn user_id(&self) -> Result<&str> {
        self.config
            .user_id()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| UpdateError::MissingConfig {
                field: "user_id".to_string(),
            })
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ReadmePipeline<S, C> {
    async fn extract(&self) -> Result<Extracted> {
        let user_id = self.user_id()?;

        if let Some(image_id) = self.config.image_id() {
            tracing::info!("Fetching specific photo: {}", image_id);

            // The feed carries the description; oEmbed does not.
            let records = match self.client.try_fetch_photos(user_id).await {
                Ok(records) => records,
                Err(e) => {
                    tracing::warn!("Feed unavailable for photo {}, trying oEmbed: {}", image_id, e);
                    Vec::new()
                }
            };
            if let Some(photo) = select_by_id(&records, image_id) {
                tracing::debug!("Photo {} found in the public feed", image_id);
                return Ok(Extracted::Single(photo));
            }

            let photo = self.client.try_fetch_single_photo(user_id, image_id).await?;
            return Ok(Extracted::Single(photo));
        }

        tracing::info!("Fetching photos for user: {}", user_id);
        let records = self.client.try_fetch_photos(user_id).await?;
        Ok(Extracted::Feed(records))
    }

    async fn transform(&self, data: Extracted) -> Result<NormalizedPhoto> {
        let photo = match data {
            Extracted::Single(photo) => photo,
            Extracted::Feed(records) => {
                if records.is_empty() {
                    return Err(UpdateError::EmptyResult {
                        message: "no photos found in the feed".to_string(),
                    });
                }
                tracing::info!("Found {} photos", records.len());

                let mut rng = self
                    .rng
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
                select_random(&records, &mut *rng).ok_or_else(|| UpdateError::EmptyResult {
                    message: "could not select a random photo".to_string(),
                })?
            }
        };

        if photo.image_url.is_empty() {
            return Err(UpdateError::EmptyResult {
                message: format!("photo '{}' has no image URL", photo.title),
            });
        }

        tracing::debug!("Selected photo: {} ({})", photo.title, photo.link);
        Ok(photo)
    }

    async fn load(&self, photo: NormalizedPhoto) -> Result<UpdateReport> {
        let path = self.config.readme_path();
        let document = render(&photo, self.config.template());

        let mut report = UpdateReport {
            path: path.to_string(),
            title: photo.title.clone(),
            image_url: photo.image_url.clone(),
            written: false,
            document,
        };

        if self.config.dry_run() {
            tracing::info!("Dry run: {} left untouched", path);
            return Ok(report);
        }

        self.storage.check_target(path).await?;
        let _lock = self.storage.lock(path).await?;
        self.storage
            .write_file(path, report.document.as_bytes())
            .await?;
        report.written = true;

        tracing::info!("README updated with: {}", photo.title);
        tracing::info!("Image URL: {}", photo.image_url);
        if !photo.description.is_empty() {
            let preview: String = photo.description.chars().take(100).collect();
            tracing::info!("Description: {}...", preview);
        }
        Ok(report)
    }
}
