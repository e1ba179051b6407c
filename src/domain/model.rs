use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_TITLE: &str = "Flickr Photo";

/// Treats an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of the public photo feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<PhotoRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Media {
    #[serde(default, deserialize_with = "null_as_default")]
    pub m: String,
}

/// One feed entry as fetched. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhotoRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub media: Media,
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub link: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub published: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    pub author: Option<String>,
    pub tags: Option<String>,
}

/// oEmbed metadata for a single photo page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OembedResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    pub title: Option<String>,
    pub author_name: Option<String>,
}

/// A photo ready to be rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedPhoto {
    pub image_url: String,
    pub title: String,
    pub link: String,
    pub description: String,
    pub published: Option<DateTime<Utc>>,
    pub author_name: Option<String>,
}

/// What the fetch stage produced.
#[derive(Debug, Clone)]
pub enum Extracted {
    Feed(Vec<PhotoRecord>),
    Single(NormalizedPhoto),
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateReport {
    pub path: String,
    pub title: String,
    pub image_url: String,
    pub written: bool,
    pub document: String,
}
