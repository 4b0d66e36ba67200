//! Error types for the wrdash dashboard
//!
//! Loading, configuration and rendering each get their own enum so callers
//! can tell a missing stats file apart from a bad config or a bad chart request.

use std::time::Duration;
use thiserror::Error;

/// Main error type for the dashboard
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Loading the statistics document failed
    #[error("Failed to load statistics: {0}")]
    Fetch(#[from] FetchError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Chart or page rendering errors
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// Reasons a statistics document could not be loaded
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The transport could not complete (connection refused, missing file, HTTP error status)
    #[error("Network failure: {0}")]
    NetworkFailure(String),

    /// The response was not valid JSON or lacked the required shape
    #[error("Invalid statistics document: {0}")]
    ParseFailure(String),

    /// The request did not complete within the configured timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
}

impl FetchError {
    /// Whether a retry policy may try the request again
    pub fn is_retryable(&self) -> bool {
        !matches!(self, FetchError::ParseFailure(_))
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::ParseFailure(err.to_string())
        } else {
            FetchError::NetworkFailure(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::ParseFailure(err.to_string())
    }
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine the configuration directory")]
    NoConfigDirectory,

    #[error("Failed to load configuration file: {0}")]
    LoadFailed(String),

    #[error("Failed to save configuration file: {0}")]
    SaveFailed(String),

    #[error("Failed to create config directory: {0}")]
    DirectoryCreationFailed(String),

    #[error("Invalid value for {field}: {value}")]
    Invalid { field: String, value: String },
}

/// Rendering errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("Unknown chart kind: {0}. Expected donut, weekday or hours")]
    UnknownChart(String),

    #[error("No statistics loaded yet")]
    NothingLoaded,

    #[error("Invalid chart dimensions: {0}")]
    InvalidDimensions(String),
}

/// Result type alias for the dashboard
pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DashboardError::Fetch(FetchError::Timeout(Duration::from_secs(5)));
        assert!(err.to_string().contains("timed out"));

        let err = DashboardError::Config(ConfigError::Invalid {
            field: "week_start_offset".to_string(),
            value: "9".to_string(),
        });
        assert!(err.to_string().contains("week_start_offset"));
    }

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DashboardError = io_err.into();
        assert!(matches!(err, DashboardError::Io(_)));

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let fetch_err: FetchError = json_err.into();
        assert!(matches!(fetch_err, FetchError::ParseFailure(_)));
    }

    #[test]
    fn test_retryable() {
        assert!(FetchError::NetworkFailure("refused".into()).is_retryable());
        assert!(FetchError::Timeout(Duration::from_secs(1)).is_retryable());
        assert!(!FetchError::ParseFailure("bad".into()).is_retryable());
    }
}
