use super::{non_empty, toml_config::TomlConfig, AppConfig};
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "flickr-readme")]
#[command(about = "Refresh a profile README with a photo from a Flickr public feed")]
pub struct CliConfig {
    /// Flickr account id whose public feed is used
    #[arg(long, env = "FLICKR_USER_ID")]
    pub user_id: Option<String>,

    /// Render this photo instead of a random one
    #[arg(long, env = "FLICKR_IMAGE_ID")]
    pub image_id: Option<String>,

    /// README file to overwrite
    #[arg(long)]
    pub readme: Option<String>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Seed for reproducible photo selection
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the rendered README instead of writing it
    #[arg(long)]
    pub dry_run: bool,

    /// Exit 0 on every handled failure
    #[arg(long)]
    pub exit_zero: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl CliConfig {
    /// Flags and environment win over the TOML file, which wins over defaults.
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut config = AppConfig::default();

        if let Some(path) = &self.config {
            tracing::info!("Loading configuration from: {}", path);
            let file = TomlConfig::from_file(path)?;
            config = config.apply_toml(&file);
        }

        if let Some(user_id) = non_empty(self.user_id.as_deref()) {
            config.user_id = Some(user_id);
        }
        if let Some(image_id) = non_empty(self.image_id.as_deref()) {
            config.image_id = Some(image_id);
        }
        if let Some(readme) = &self.readme {
            config.readme_path = readme.clone();
        }
        if let Some(timeout) = self.timeout_secs {
            config.timeout_seconds = timeout;
        }
        config.dry_run = self.dry_run;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse(args: &[&str]) -> CliConfig {
        let mut argv = vec!["flickr-readme"];
        argv.extend_from_slice(args);
        CliConfig::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_flags_override_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            b"[flickr]\nuser_id = \"file-user\"\ntimeout_seconds = 30\n[readme]\npath = \"file.md\"\n",
        )
        .unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let cli = parse(&["--config", &path, "--user-id", "flag-user", "--readme", "flag.md"]);
        let config = cli.resolve().unwrap();

        assert_eq!(config.user_id.as_deref(), Some("flag-user"));
        assert_eq!(config.readme_path, "flag.md");
        assert_eq!(config.timeout_seconds, 30);
    }

    #[test]
    fn test_blank_image_id_is_unset() {
        let config = parse(&["--user-id", "me", "--image-id", ""]).resolve().unwrap();
        assert!(config.image_id.is_none());
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["--user-id", "me", "--dry-run", "--seed", "3"]);
        assert_eq!(cli.seed, Some(3));
        assert_eq!(cli.log_format, LogFormat::Compact);

        let config = cli.resolve().unwrap();
        assert!(config.dry_run);
        assert_eq!(config.readme_path, "README.md");
        assert_eq!(config.timeout_seconds, 10);
    }
}
