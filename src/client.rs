//! Loads the statistics document over HTTP or from disk.

use reqwest::Client;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::Config;
use crate::error::FetchError;
use crate::stats::StatsDocument;

/// Where the statistics document lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsSource {
    Url(String),
    File(PathBuf),
}

impl StatsSource {
    /// `http://` and `https://` are URLs, anything else is a path
    pub fn parse(source: &str) -> Self {
        let trimmed = source.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            StatsSource::Url(trimmed.to_string())
        } else {
            StatsSource::File(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for StatsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatsSource::Url(url) => f.write_str(url),
            StatsSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl From<&str> for StatsSource {
    fn from(source: &str) -> Self {
        StatsSource::parse(source)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff: Duration,
}

impl RetryPolicy {
    /// `max_attempts` counts the first try and is at least 1
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        RetryPolicy {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    pub fn none() -> Self {
        RetryPolicy::new(1, Duration::ZERO)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Wait before the given retry, doubling each time. `attempt` is 1 for
    /// the first retry.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.backoff.saturating_mul(1u32 << exponent)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy::none()
    }
}

pub struct StatsClient {
    client: Client,
    timeout: Option<Duration>,
    retry: RetryPolicy,
}

impl Default for StatsClient {
    fn default() -> Self {
        StatsClient::new()
    }
}

impl StatsClient {
    pub fn new() -> Self {
        StatsClient {
            client: Client::new(),
            timeout: None,
            retry: RetryPolicy::none(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let client = StatsClient::new().with_retry(config.retry.to_policy());
        match config.timeout() {
            Some(timeout) => client.with_timeout(timeout),
            None => client,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Fetch, parse and validate the statistics document.
    ///
    /// Network failures and timeouts are retried according to the retry
    /// policy; a document that does not parse is never retried.
    pub async fn load(&self, source: &StatsSource) -> Result<StatsDocument, FetchError> {
        let mut attempt = 1;
        loop {
            match self.load_once(source).await {
                Ok(document) => {
                    tracing::info!(%source, attempt, "Loaded statistics");
                    return Ok(document);
                }
                Err(err) if err.is_retryable() && attempt < self.retry.max_attempts() => {
                    let delay = self.retry.delay_for(attempt);
                    tracing::warn!(
                        %source,
                        attempt,
                        error = %err,
                        "Loading statistics failed, retrying in {:?}",
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    tracing::error!(%source, attempt, error = %err, "Loading statistics failed");
                    return Err(err);
                }
            }
        }
    }

    async fn load_once(&self, source: &StatsSource) -> Result<StatsDocument, FetchError> {
        let text = match source {
            StatsSource::Url(url) => self.fetch_url(url).await?,
            StatsSource::File(path) => self.read_file(path).await?,
        };
        StatsDocument::from_json(&text)
    }

    async fn fetch_url(&self, url: &str) -> Result<String, FetchError> {
        let mut request = self.client.get(url).header("Accept", "application/json");
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| self.map_error(e))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(FetchError::NetworkFailure(format!(
                "GET {} returned {}",
                url, status
            )));
        }

        response.text().await.map_err(|e| self.map_error(e))
    }

    async fn read_file(&self, path: &Path) -> Result<String, FetchError> {
        let read = tokio::fs::read_to_string(path);
        let result = match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, read)
                .await
                .map_err(|_| FetchError::Timeout(timeout))?,
            None => read.await,
        };
        result.map_err(|e| FetchError::NetworkFailure(format!("{}: {}", path.display(), e)))
    }

    fn map_error(&self, err: reqwest::Error) -> FetchError {
        match self.timeout {
            Some(timeout) if err.is_timeout() => FetchError::Timeout(timeout),
            _ => err.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_source() {
        assert_eq!(
            StatsSource::parse("https://example.com/stats.json"),
            StatsSource::Url("https://example.com/stats.json".to_string())
        );
        assert_eq!(
            StatsSource::parse("HTTP://host/s.json"),
            StatsSource::Url("HTTP://host/s.json".to_string())
        );
        assert_eq!(
            StatsSource::parse(" shared/stats.json "),
            StatsSource::File(PathBuf::from("shared/stats.json"))
        );
    }

    #[test]
    fn test_retry_backoff_doubles() {
        let policy = RetryPolicy::new(4, Duration::from_millis(100));
        assert_eq!(policy.delay_for(1), Duration::from_millis(100));
        assert_eq!(policy.delay_for(2), Duration::from_millis(200));
        assert_eq!(policy.delay_for(3), Duration::from_millis(400));
    }

    #[test]
    fn test_retry_at_least_one_attempt() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_attempts(), 1);
        assert_eq!(RetryPolicy::default(), RetryPolicy::none());
    }

    #[test]
    fn test_from_config() {
        let config = Config {
            timeout_secs: Some(3),
            ..Config::default()
        };
        let client = StatsClient::from_config(&config);
        assert_eq!(client.timeout(), Some(Duration::from_secs(3)));
        assert_eq!(client.retry_policy().max_attempts(), 1);
    }

    #[tokio::test]
    async fn test_missing_file_is_network_failure() {
        let client = StatsClient::new();
        let source = StatsSource::File(PathBuf::from("/nonexistent/wrdash/stats.json"));
        assert!(matches!(
            client.load(&source).await,
            Err(FetchError::NetworkFailure(_))
        ));
    }
}
