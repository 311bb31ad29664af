use crate::api::TimeWindow;
use anyhow::Result;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "world-news";

/// Pieces of the search query that stay fixed between requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_section")]
    pub section: String,
    #[serde(default = "default_order_by")]
    pub order_by: String,
    #[serde(default = "default_format")]
    pub format: String,
    /// The public "test" key is rate limited and caps results at 10 per page.
    #[serde(default = "default_api_key")]
    pub api_key: String,
}

fn default_endpoint() -> String {
    "https://content.guardianapis.com/search".to_string()
}

fn default_section() -> String {
    "world".to_string()
}

fn default_order_by() -> String {
    "oldest".to_string()
}

fn default_format() -> String {
    "json".to_string()
}

fn default_api_key() -> String {
    "test".to_string()
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            section: default_section(),
            order_by: default_order_by(),
            format: default_format(),
            api_key: default_api_key(),
        }
    }
}

impl QueryConfig {
    /// Request URL without the `from-date` filter.
    pub fn template(&self) -> String {
        format!(
            "{}?section={}&order-by={}&format={}&api-key={}",
            self.endpoint, self.section, self.order_by, self.format, self.api_key
        )
    }
}

/// UI selection that survives restarts. Handed to the loader at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default)]
    pub selected_window: TimeWindow,
    #[serde(default)]
    pub has_activated_once: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default = "default_week_start")]
    pub week_start: Weekday,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_connectivity_timeout")]
    pub connectivity_timeout_ms: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub session: SessionState,
}

fn default_week_start() -> Weekday {
    Weekday::Mon
}

fn default_request_timeout() -> u64 {
    15
}

fn default_connectivity_timeout() -> u64 {
    1500
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            query: QueryConfig::default(),
            week_start: default_week_start(),
            request_timeout_secs: default_request_timeout(),
            connectivity_timeout_ms: default_connectivity_timeout(),
            log_level: default_log_level(),
            session: SessionState::default(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join(APP_DIR);

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        Ok(config_dir)
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("world-news.log"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Reads `path`, writing the defaults there first if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Config::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = fs::read_to_string(path)?;
        let mut config: Config = serde_json::from_str(&content)?;
        if config.request_timeout_secs == 0 {
            config.request_timeout_secs = default_request_timeout();
        }
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    // Config for tests: defaults, never touches the filesystem.
    #[doc(hidden)]
    pub fn test_config() -> Self {
        Self::default()
    }
}
