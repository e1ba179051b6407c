use serde::{Deserialize, Serialize};

pub const DEFAULT_FEED_URL: &str =
    "https://www.flickr.com/services/feeds/photos_public.gne?id={user_id}&format=json&nojsoncallback=1";
pub const DEFAULT_OEMBED_URL: &str = "https://www.flickr.com/services/oembed/";
pub const DEFAULT_PHOTO_PAGE_URL: &str = "https://www.flickr.com/photos/{user_id}/{photo_id}";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Where the photo metadata comes from.
///
/// `feed_url` takes a `{user_id}` placeholder, `photo_page_url` takes both
/// `{user_id}` and `{photo_id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedEndpoints {
    pub feed_url: String,
    pub oembed_url: String,
    pub photo_page_url: String,
}

impl Default for FeedEndpoints {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            oembed_url: DEFAULT_OEMBED_URL.to_string(),
            photo_page_url: DEFAULT_PHOTO_PAGE_URL.to_string(),
        }
    }
}

impl FeedEndpoints {
    pub fn feed_url_for(&self, user_id: &str) -> String {
        self.feed_url.replace("{user_id}", user_id)
    }

    pub fn photo_page_for(&self, user_id: &str, photo_id: &str) -> String {
        self.photo_page_url
            .replace("{user_id}", user_id)
            .replace("{photo_id}", photo_id)
    }
}

/// Commented-out stats card kept below the rule; set an empty footer to drop it.
pub const DEFAULT_FOOTER: &str = "<!-- <img
  src=\"https://github.com/user3301/user3301/blob/master/images/stat.svg\"
  alt=\"My Activity Stats\"
/>
 -->";

/// Fixed text around the photo in the rendered README.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadmeTemplate {
    pub heading: String,
    pub tagline: String,
    pub badge_alt: String,
    pub badge_url: String,
    pub footer: Option<String>,
}

impl Default for ReadmeTemplate {
    fn default() -> Self {
        Self {
            heading: "I am user3301".to_string(),
            tagline: "📸 ᴬ ᵈᵃⁱˡʸ ˢʰᵘᶠᶠˡᵉ ᶠʳᵒᵐ ᵐʸ ˡᵉⁿˢ ᵗᵒ ʸᵒᵘʳ ˢᶜʳᵉᵉⁿ".to_string(),
            badge_alt: "Powered by GitHub Actions".to_string(),
            badge_url: "https://img.shields.io/badge/Powered%20by-GitHub%20Actions-blue?logo=githubactions&logoColor=white".to_string(),
            footer: Some(DEFAULT_FOOTER.to_string()),
        }
    }
}
