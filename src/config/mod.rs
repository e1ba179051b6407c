#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::domain::settings::{FeedEndpoints, ReadmeTemplate, DEFAULT_TIMEOUT_SECS};
use crate::utils::error::{Result, UpdateError};
use crate::utils::validation::{self, Validate};
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_README_PATH: &str = "README.md";

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub user_id: Option<String>,
    pub image_id: Option<String>,
    pub readme_path: String,
    pub endpoints: FeedEndpoints,
    pub timeout_seconds: u64,
    pub template: ReadmeTemplate,
    pub dry_run: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            user_id: None,
            image_id: None,
            readme_path: DEFAULT_README_PATH.to_string(),
            endpoints: FeedEndpoints::default(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            template: ReadmeTemplate::default(),
            dry_run: false,
        }
    }
}

/// Empty strings count as unset; CI systems often export blank variables.
pub(crate) fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl AppConfig {
    /// Layers values from a TOML file over the current settings.
    pub fn apply_toml(mut self, file: &TomlConfig) -> Self {
        let flickr = &file.flickr;
        if let Some(user_id) = non_empty(flickr.user_id.as_deref()) {
            self.user_id = Some(user_id);
        }
        if let Some(image_id) = non_empty(flickr.image_id.as_deref()) {
            self.image_id = Some(image_id);
        }
        if let Some(url) = &flickr.feed_url {
            self.endpoints.feed_url = url.clone();
        }
        if let Some(url) = &flickr.oembed_url {
            self.endpoints.oembed_url = url.clone();
        }
        if let Some(url) = &flickr.photo_page_url {
            self.endpoints.photo_page_url = url.clone();
        }
        if let Some(timeout) = flickr.timeout_seconds {
            self.timeout_seconds = timeout;
        }

        let readme = &file.readme;
        if let Some(path) = &readme.path {
            self.readme_path = path.clone();
        }
        if let Some(heading) = &readme.heading {
            self.template.heading = heading.clone();
        }
        if let Some(tagline) = &readme.tagline {
            self.template.tagline = tagline.clone();
        }
        if let Some(alt) = &readme.badge_alt {
            self.template.badge_alt = alt.clone();
        }
        if let Some(url) = &readme.badge_url {
            self.template.badge_url = url.clone();
        }
        if readme.footer.is_some() {
            self.template.footer = readme.footer.clone();
        }
        self
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        let user_id = validation::validate_required_field("user_id", &self.user_id)?;
        validation::validate_non_empty_string("user_id", user_id)?;

        let ids = [
            ("user_id", Some(user_id.as_str())),
            ("image_id", self.image_id.as_deref()),
        ];
        for (field, value) in ids {
            if let Some(value) = value.filter(|v| v.contains("${")) {
                return Err(UpdateError::InvalidConfigValue {
                    field: field.to_string(),
                    value: value.to_string(),
                    reason: "Unresolved environment placeholder".to_string(),
                });
            }
        }

        validation::validate_url_template(
            "flickr.feed_url",
            &self.endpoints.feed_url,
            &["{user_id}"],
        )?;
        validation::validate_url("flickr.oembed_url", &self.endpoints.oembed_url)?;
        validation::validate_url_template(
            "flickr.photo_page_url",
            &self.endpoints.photo_page_url,
            &["{user_id}", "{photo_id}"],
        )?;
        validation::validate_range("flickr.timeout_seconds", self.timeout_seconds, 1, 300)?;
        validation::validate_path("readme.path", &self.readme_path)?;
        Ok(())
    }
}

impl ConfigProvider for AppConfig {
    fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    fn image_id(&self) -> Option<&str> {
        self.image_id.as_deref()
    }

    fn readme_path(&self) -> &str {
        &self.readme_path
    }

    fn endpoints(&self) -> &FeedEndpoints {
        &self.endpoints
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn template(&self) -> &ReadmeTemplate {
        &self.template
    }

    fn dry_run(&self) -> bool {
        self.dry_run
    }
}
