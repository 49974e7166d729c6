use adminstyle_cache::{Cache, FileCacheStore, SystemClock};
use adminstyle_common::{RealFileSystem, DEFAULT_BASE_SIZE};
use adminstyle_settings::JsonFileRepository;
use adminstyle_workspace::{ServiceConfig, StyleService};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_CONFIG_NAME: &str = "adminstyle.config.json";

/// adminstyle configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Settings document location, relative to the config file
    #[serde(default = "default_settings_path")]
    pub settings_path: String,

    /// Directory holding cached stylesheets
    #[serde(default = "default_cache_dir")]
    pub cache_dir: String,

    /// Root font size used for px↔rem conversion
    #[serde(default = "default_base_font_size")]
    pub base_font_size: f64,

    #[serde(default = "default_stylesheet_key")]
    pub stylesheet_key: String,
}

fn default_settings_path() -> String {
    "adminstyle.settings.json".to_string()
}

fn default_cache_dir() -> String {
    ".adminstyle-cache".to_string()
}

fn default_base_font_size() -> f64 {
    DEFAULT_BASE_SIZE
}

fn default_stylesheet_key() -> String {
    ServiceConfig::default().stylesheet_key
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            debug!(path = %config_path.display(), "Loaded config");
            Ok(config)
        } else {
            // Return default config if none exists
            debug!(path = %config_path.display(), "No config file, using defaults");
            Ok(Config::default())
        }
    }

    pub fn get_settings_path(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.settings_path)
    }

    pub fn get_cache_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.cache_dir)
    }

    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            stylesheet_key: self.stylesheet_key.clone(),
            base_font_size: self.base_font_size,
        }
    }

    /// File-backed service rooted at `cwd`
    pub fn service(&self, cwd: &str) -> StyleService {
        let fs = Arc::new(RealFileSystem);
        let repository = JsonFileRepository::new(fs.clone(), self.get_settings_path(cwd));
        let cache = Cache::new(
            Arc::new(FileCacheStore::new(fs, self.get_cache_dir(cwd))),
            Arc::new(SystemClock),
        );

        StyleService::new(Arc::new(repository), cache, self.service_config())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            settings_path: default_settings_path(),
            cache_dir: default_cache_dir(),
            base_font_size: default_base_font_size(),
            stylesheet_key: default_stylesheet_key(),
        }
    }
}
