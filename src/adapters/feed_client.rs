use crate::core::selector::upsize_image_url;
use crate::domain::model::{FeedResponse, NormalizedPhoto, OembedResponse, PhotoRecord, DEFAULT_TITLE};
use crate::domain::settings::FeedEndpoints;
use crate::utils::error::{Result, UpdateError};
use reqwest::Client;
use std::time::Duration;

/// Talks to the public feed and oEmbed endpoints. One request per call, no retries.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: Client,
    endpoints: FeedEndpoints,
}

impl FeedClient {
    pub fn new(endpoints: FeedEndpoints, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoints })
    }

    pub fn endpoints(&self) -> &FeedEndpoints {
        &self.endpoints
    }

    /// Fetches the feed items, or an empty list if anything goes wrong.
    pub async fn fetch_photos(&self, user_id: &str) -> Vec<PhotoRecord> {
        match self.try_fetch_photos(user_id).await {
            Ok(items) => items,
            Err(e) => {
                tracing::error!("Error fetching Flickr photos: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn try_fetch_photos(&self, user_id: &str) -> Result<Vec<PhotoRecord>> {
        let url = self.endpoints.feed_url_for(user_id);
        tracing::debug!("Making feed request to: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        tracing::debug!("Feed response status: {}", status);

        if !status.is_success() {
            return Err(UpdateError::HttpStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let feed = decode_feed(&body)?;
        tracing::debug!("Feed returned {} items", feed.items.len());
        Ok(feed.items)
    }

    /// Looks up one photo through oEmbed, or `None` if anything goes wrong.
    pub async fn fetch_single_photo(&self, user_id: &str, photo_id: &str) -> Option<NormalizedPhoto> {
        match self.try_fetch_single_photo(user_id, photo_id).await {
            Ok(photo) => Some(photo),
            Err(e) => {
                tracing::error!("Error fetching specific Flickr photo: {}", e);
                None
            }
        }
    }

    pub async fn try_fetch_single_photo(
        &self,
        user_id: &str,
        photo_id: &str,
    ) -> Result<NormalizedPhoto> {
        let page_url = self.endpoints.photo_page_for(user_id, photo_id);
        tracing::debug!("Making oEmbed request for: {}", page_url);

        let response = self
            .client
            .get(&self.endpoints.oembed_url)
            .query(&[("format", "json"), ("url", page_url.as_str())])
            .send()
            .await?;
        let status = response.status();
        tracing::debug!("oEmbed response status: {}", status);

        if !status.is_success() {
            return Err(UpdateError::HttpStatus {
                status: status.as_u16(),
                url: self.endpoints.oembed_url.clone(),
            });
        }

        let body = response.text().await?;
        let oembed: OembedResponse = serde_json::from_str(&body)?;

        Ok(NormalizedPhoto {
            image_url: upsize_image_url(&oembed.url),
            title: oembed.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            link: page_url,
            description: String::new(),
            published: None,
            author_name: oembed.author_name.filter(|name| !name.is_empty()),
        })
    }
}

/// The feed escapes apostrophes as `\'`, which is not valid JSON.
fn decode_feed(body: &str) -> Result<FeedResponse> {
    let cleaned = body.replace("\\'", "'");
    Ok(serde_json::from_str(&cleaned)?)
}
