//! Configuration management with TOML, environment variables, and CLI overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Catalog category URLs to walk
    #[serde(default = "default_category_urls")]
    pub category_urls: Vec<String>,

    /// Number of auction search-result pages to fetch
    #[serde(default = "default_num_pages")]
    pub num_pages: u32,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Base delay before each category/search page request in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Random jitter added to the page delay (0 to this value)
    #[serde(default = "default_delay_jitter_ms")]
    pub delay_jitter_ms: u64,

    /// Base delay before each coin detail request
    #[serde(default = "default_detail_delay_ms")]
    pub detail_delay_ms: u64,

    /// Random jitter added to the detail delay
    #[serde(default = "default_detail_delay_jitter_ms")]
    pub detail_delay_jitter_ms: u64,

    /// Base delay before each image download
    #[serde(default = "default_image_delay_ms")]
    pub image_delay_ms: u64,

    /// Random jitter added to the image delay
    #[serde(default = "default_image_delay_jitter_ms")]
    pub image_delay_jitter_ms: u64,

    /// Directory the dataset file is written under
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Dataset CSV filename
    #[serde(default = "default_dataset_file")]
    pub dataset_file: String,

    /// Directory downloaded images are written under
    #[serde(default = "default_image_dir")]
    pub image_dir: PathBuf,

    /// Append-only log file for the run
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

fn default_category_urls() -> Vec<String> {
    // Morgan Dollars as the built-in example category
    vec!["https://www.pcgs.com/coinfacts/category/morgan-dollars-1878-1921/744".to_string()]
}

fn default_num_pages() -> u32 {
    10
}

fn default_delay_ms() -> u64 {
    2000
}

fn default_delay_jitter_ms() -> u64 {
    2000
}

fn default_detail_delay_ms() -> u64 {
    1500
}

fn default_detail_delay_jitter_ms() -> u64 {
    1500
}

fn default_image_delay_ms() -> u64 {
    500
}

fn default_image_delay_jitter_ms() -> u64 {
    1000
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("coin_data")
}

fn default_dataset_file() -> String {
    "coin_data.csv".to_string()
}

fn default_image_dir() -> PathBuf {
    PathBuf::from("coin_images")
}

fn default_log_file() -> PathBuf {
    PathBuf::from("coin_scraper.log")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            category_urls: default_category_urls(),
            num_pages: default_num_pages(),
            proxy: None,
            delay_ms: default_delay_ms(),
            delay_jitter_ms: default_delay_jitter_ms(),
            detail_delay_ms: default_detail_delay_ms(),
            detail_delay_jitter_ms: default_detail_delay_jitter_ms(),
            image_delay_ms: default_image_delay_ms(),
            image_delay_jitter_ms: default_image_delay_jitter_ms(),
            data_dir: default_data_dir(),
            dataset_file: default_dataset_file(),
            image_dir: default_image_dir(),
            log_file: default_log_file(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("coin-scraper").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        // 4. Return default config
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(proxy) = std::env::var("COIN_PROXY") {
            self.proxy = Some(proxy);
        }

        if let Ok(delay) = std::env::var("COIN_DELAY") {
            if let Ok(d) = delay.parse() {
                self.delay_ms = d;
            }
        }

        if let Ok(pages) = std::env::var("COIN_PAGES") {
            if let Ok(p) = pages.parse() {
                self.num_pages = p;
            }
        }

        self
    }

    /// Full path of the dataset CSV for this run.
    pub fn dataset_path(&self) -> PathBuf {
        self.data_dir.join(&self.dataset_file)
    }
}
