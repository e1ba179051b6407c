use crate::domain::model::{NormalizedPhoto, PhotoRecord, DEFAULT_TITLE};
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use scraper::Html;
use std::sync::LazyLock;

pub const SMALL_SIZE_MARKER: &str = "_m.jpg";
pub const LARGE_SIZE_MARKER: &str = "_b.jpg";
pub const MAX_DESCRIPTION_CHARS: usize = 500;
pub const TRUNCATION_MARKER: &str = "...";

static POSTED_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.+?\s+posted a photo:\s*").expect("posted-a-photo pattern is valid")
});

/// Picks one record uniformly at random and normalizes it.
pub fn select_random<R: Rng + ?Sized>(
    records: &[PhotoRecord],
    rng: &mut R,
) -> Option<NormalizedPhoto> {
    let Some(record) = records.choose(rng) else {
        tracing::warn!("No photos available");
        return None;
    };
    Some(normalize(record))
}

/// Finds the feed record whose page link ends in `photo_id`.
pub fn select_by_id(records: &[PhotoRecord], photo_id: &str) -> Option<NormalizedPhoto> {
    records
        .iter()
        .find(|record| link_photo_id(&record.link) == Some(photo_id))
        .map(normalize)
}

fn link_photo_id(link: &str) -> Option<&str> {
    link.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
}

pub fn normalize(record: &PhotoRecord) -> NormalizedPhoto {
    let description = strip_html_tags(&record.description);
    let description = strip_posted_prefix(&description);
    let description = truncate_description(&description);

    NormalizedPhoto {
        image_url: upsize_image_url(&record.media.m),
        title: record
            .title
            .clone()
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        link: record.link.clone(),
        description,
        published: parse_published(&record.published),
        author_name: record.author.clone(),
    }
}

/// Swaps the small-size suffix for the large one; no-op when absent.
pub fn upsize_image_url(url: &str) -> String {
    url.replace(SMALL_SIZE_MARKER, LARGE_SIZE_MARKER)
}

/// Text content of an HTML fragment with character references decoded.
pub fn strip_html_tags(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }
    let fragment = Html::parse_fragment(html);
    let text: String = fragment.root_element().text().collect();
    text.trim().to_string()
}

/// Drops the leading "<someone> posted a photo:" boilerplate the feed adds.
pub fn strip_posted_prefix(text: &str) -> String {
    POSTED_PREFIX.replacen(text, 1, "").into_owned()
}

pub fn truncate_description(text: &str) -> String {
    if text.chars().count() <= MAX_DESCRIPTION_CHARS {
        return text.to_string();
    }
    let keep = MAX_DESCRIPTION_CHARS - TRUNCATION_MARKER.chars().count();
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str(TRUNCATION_MARKER);
    truncated
}

fn parse_published(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
