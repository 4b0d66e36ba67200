use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::client::RetryPolicy;
use crate::error::ConfigError;
use crate::page::Viewport;

/// Where the upstream collector drops its output
pub const DEFAULT_SOURCE: &str = "shared/stats.json";

/// Shown in every text slot when the statistics cannot be loaded
pub const DEFAULT_FAILURE_MESSAGE: &str = "Could not load statistics";

/// Slot shift that puts Friday first: [Fri, Sat, Sun, Mon, Tue, Wed, Thu]
pub const DEFAULT_WEEK_START_OFFSET: u32 = 3;

pub const DEFAULT_LEADERBOARD_SIZE: usize = 10;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// URL or filesystem path of the stats document
    pub source: String,
    /// Where `render` writes the HTML page
    pub output: PathBuf,
    pub week_start_offset: u32,
    /// No timeout when unset
    pub timeout_secs: Option<u64>,
    pub retry: RetryConfig,
    pub leaderboard_size: usize,
    pub failure_message: String,
    pub viewport: Viewport,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub backoff_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        RetryConfig {
            max_attempts: 1,
            backoff_ms: 500,
        }
    }
}

impl RetryConfig {
    pub fn to_policy(self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_millis(self.backoff_ms))
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source: DEFAULT_SOURCE.to_string(),
            output: PathBuf::from("dashboard.html"),
            week_start_offset: DEFAULT_WEEK_START_OFFSET,
            timeout_secs: None,
            retry: RetryConfig::default(),
            leaderboard_size: DEFAULT_LEADERBOARD_SIZE,
            failure_message: DEFAULT_FAILURE_MESSAGE.to_string(),
            viewport: Viewport::default(),
        }
    }
}

/// Command-line values that take precedence over the config file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overrides {
    pub leaderboard_size: Option<usize>,
    pub viewport_width: Option<u32>,
    pub viewport_height: Option<u32>,
}

impl Config {
    pub fn get_config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "wrdash", "wrdash")
            .map(|proj_dirs| proj_dirs.config_dir().join("config.json"))
    }

    /// Load the user config, falling back to defaults when no file exists
    pub fn load() -> Result<Self, ConfigError> {
        match Self::get_config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                tracing::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let config_data = fs::read_to_string(path)
            .map_err(|e| ConfigError::LoadFailed(format!("{}: {}", path.display(), e)))?;

        let config: Config = serde_json::from_str(&config_data)
            .map_err(|e| ConfigError::LoadFailed(format!("{}: {}", path.display(), e)))?;

        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Write the config to the platform config directory and return its path
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let config_path = Self::get_config_path().ok_or(ConfigError::NoConfigDirectory)?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::DirectoryCreationFailed(e.to_string()))?;
        }

        let config_data = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        fs::write(path, config_data).map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.week_start_offset >= 7 {
            return Err(invalid("week_start_offset", self.week_start_offset));
        }
        if self.retry.max_attempts == 0 {
            return Err(invalid("retry.max_attempts", self.retry.max_attempts));
        }
        if self.leaderboard_size == 0 {
            return Err(invalid("leaderboard_size", self.leaderboard_size));
        }
        if self.timeout_secs == Some(0) {
            return Err(invalid("timeout_secs", 0));
        }
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(invalid(
                "viewport",
                format!("{}x{}", self.viewport.width, self.viewport.height),
            ));
        }
        Ok(())
    }

    /// Apply overrides and validate the merged config
    pub fn with_overrides(mut self, overrides: Overrides) -> Result<Self, ConfigError> {
        if let Some(size) = overrides.leaderboard_size {
            self.leaderboard_size = size;
        }
        if let Some(width) = overrides.viewport_width {
            self.viewport.width = width;
        }
        if let Some(height) = overrides.viewport_height {
            self.viewport.height = height;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn invalid(field: &str, value: impl ToString) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        value: value.to_string(),
    }
}
