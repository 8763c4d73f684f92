//! Configuration management for storyreel.
//!
//! Configuration is read from `~/.config/storyreel/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cache::DEFAULT_CAPACITY;
use crate::store::LEDGER_FILE_NAME;
use crate::viewer::ViewerTiming;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ledger: LedgerConfig,
    pub source: SourceConfig,
    pub feed: FeedConfig,
    pub viewer: ViewerConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Ledger file; defaults to the platform data directory.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub location: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            location: "bundled".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub page_delay_ms: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_delay_ms: 1500,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub total_duration_ms: u64,
    pub step_interval_ms: u64,
    pub dismiss_delay_ms: u64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            total_duration_ms: 3000,
            step_interval_ms: 100,
            dismiss_delay_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            Self::create_default_config(config_path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| ConfigError::Io {
            path: config_path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/storyreel/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("storyreel").join("config.toml"))
    }

    /// Ledger location, falling back to `<data dir>/storyreel/viewed_stories.json`.
    pub fn ledger_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.ledger.path {
            return Ok(path.clone());
        }
        let data_dir = dirs::data_dir().ok_or(ConfigError::NoDataDir)?;
        Ok(data_dir.join("storyreel").join(LEDGER_FILE_NAME))
    }

    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.feed.page_delay_ms)
    }

    pub fn viewer_timing(&self) -> ViewerTiming {
        ViewerTiming {
            total: Duration::from_millis(self.viewer.total_duration_ms),
            step: Duration::from_millis(self.viewer.step_interval_ms),
            dismiss_delay: Duration::from_millis(self.viewer.dismiss_delay_ms),
        }
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# storyreel configuration

[ledger]
# Where viewed/liked stories are recorded.
# Defaults to <data dir>/storyreel/viewed_stories.json
# path = "/home/me/.local/share/storyreel/viewed_stories.json"

[source]
# Story strip source: "bundled", a file path, or an http(s) URL
location = "bundled"

[feed]
# Simulated wait before each page after the first (milliseconds)
page_delay_ms = 1500

[viewer]
# Auto-advance: total run time and progress step (milliseconds)
total_duration_ms = 3000
step_interval_ms = 100
# Pause after the last step before the viewer closes itself
dismiss_delay_ms = 300

[cache]
# Maximum number of cached responses
capacity = 100
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Could not determine data directory")]
    NoDataDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
