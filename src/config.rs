use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Deserialize;

/// Application configuration loaded from TOML config file.
/// All fields have defaults matching the stock run; the file is optional.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Listing page crawled by `scrape`.
    pub listing_url: String,
    /// Scrape output and convert input.
    pub json_path: PathBuf,
    /// Convert output.
    pub yaml_path: PathBuf,
    /// Fill descriptions from the lyrics site.
    pub lyrics: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listing_url: "https://gochiusa.info/artist/2".to_string(),
            json_path: PathBuf::from("result.json"),
            yaml_path: PathBuf::from("result.yaml"),
            lyrics: true,
        }
    }
}

impl AppConfig {
    /// Load config from `~/.config/songharvest/config.toml`.
    /// Returns default config if file doesn't exist.
    /// Logs a warning if the file exists but can't be parsed.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) if path.exists() => match std::fs::read_to_string(&path) {
                Ok(contents) => match Self::parse(&contents) {
                    Ok(config) => {
                        log::info!("Loaded config from {}", path.display());
                        config
                    }
                    Err(e) => {
                        log::warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                        Self::default()
                    }
                },
                Err(e) => {
                    log::warn!("Failed to read {}: {}. Using defaults.", path.display(), e);
                    Self::default()
                }
            },
            _ => {
                log::debug!("No config file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", crate::APP_NAME)
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
