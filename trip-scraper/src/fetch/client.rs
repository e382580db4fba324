//! HTTP client for vendor route pages.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use tokio::sync::Semaphore;
use tracing::debug;

use super::PageSource;
use super::error::FetchError;

/// Browser user agent; the vendor site rejects obvious bots.
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Configuration for the page client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
}

impl FetchConfig {
    /// Set a custom user agent.
    pub fn with_user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = ua.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }
}

/// Fetches route pages over HTTP.
///
/// Uses a semaphore to bound concurrent requests. Requests are never
/// retried.
#[derive(Debug, Clone)]
pub struct PageClient {
    http: reqwest::Client,
    semaphore: Arc<Semaphore>,
}

impl PageClient {
    /// Create a client with the given configuration.
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        if config.max_concurrent == 0 {
            return Err(FetchError::NotConfigured(
                "max_concurrent must be at least 1".to_string(),
            ));
        }

        let mut headers = HeaderMap::new();
        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|_| FetchError::NotConfigured("invalid user agent".to_string()))?;
        headers.insert(USER_AGENT, user_agent);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }
}

impl PageSource for PageClient {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| FetchError::NotConfigured("semaphore closed".to_string()))?;

        debug!(url, "fetching page");
        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = FetchConfig::default();
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.max_concurrent, 4);
    }

    #[test]
    fn config_builders() {
        let config = FetchConfig::default()
            .with_user_agent("test-agent")
            .with_timeout(5)
            .with_max_concurrent(2);
        assert_eq!(config.user_agent, "test-agent");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.max_concurrent, 2);
    }

    #[test]
    fn config_deserializes_partial() {
        let config: FetchConfig = serde_json::from_str(r#"{"timeout_secs": 10}"#).unwrap();
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.max_concurrent, 4);
    }

    #[test]
    fn rejects_zero_concurrency() {
        let config = FetchConfig::default().with_max_concurrent(0);
        assert!(matches!(
            PageClient::new(&config),
            Err(FetchError::NotConfigured(_))
        ));
    }

    #[test]
    fn rejects_invalid_user_agent() {
        let config = FetchConfig::default().with_user_agent("bad\nagent");
        assert!(matches!(
            PageClient::new(&config),
            Err(FetchError::NotConfigured(_))
        ));
    }
}
