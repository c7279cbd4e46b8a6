//! Song details provider trait and HTTP implementation

use crate::details::SongDetails;
use crate::error::{MetadataError, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Timeout for a single API request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Trait for song details lookup implementations
#[async_trait]
pub trait SongInfoProvider: Send + Sync {
    /// Fetch details for a song.
    ///
    /// # Returns
    /// - `Ok(Some(details))` if the API knows the song
    /// - `Ok(None)` if the API has no entry for it
    /// - `Err` on network or API failure
    async fn fetch(&self, group: &str, title: &str) -> Result<Option<SongDetails>>;
}

/// Retry configuration for transient lookup failures
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts
    pub max_attempts: usize,
    /// Base delay for exponential backoff
    pub base_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 100,
        }
    }
}

impl RetryConfig {
    /// Backoff delay before the given (1-based) retry attempt, capped at 10s.
    fn backoff_duration(&self, attempt: usize) -> Duration {
        let delay_ms = self.base_delay_ms * 2u64.pow(attempt as u32);
        Duration::from_millis(delay_ms.min(10_000))
    }
}

/// HTTP implementation of [`SongInfoProvider`].
///
/// Issues `GET {base_url}/info?group={group}&song={title}` and expects a JSON
/// [`SongDetails`] body. A 404 means the song is unknown to the API and maps
/// to `Ok(None)`; other non-2xx statuses are lookup failures and are retried
/// with exponential backoff.
pub struct HttpSongInfoProvider {
    client: reqwest::Client,
    base_url: String,
    retry: RetryConfig,
}

impl HttpSongInfoProvider {
    pub fn new(base_url: impl Into<String>, user_agent: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent.into())
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            retry: RetryConfig::default(),
        })
    }

    /// Override the retry behavior.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    fn info_url(&self, group: &str, title: &str) -> String {
        format!(
            "{}/info?group={}&song={}",
            self.base_url,
            urlencoding::encode(group),
            urlencoding::encode(title)
        )
    }

    async fn fetch_once(&self, url: &str) -> Result<Option<SongDetails>> {
        let response = self.client.get(url).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let details = response
                    .json::<SongDetails>()
                    .await
                    .map_err(|e| MetadataError::InvalidResponse(e.to_string()))?;
                Ok(Some(details))
            }
            status => Err(MetadataError::LookupFailed(format!(
                "external API returned HTTP {status}"
            ))),
        }
    }
}

#[async_trait]
impl SongInfoProvider for HttpSongInfoProvider {
    async fn fetch(&self, group: &str, title: &str) -> Result<Option<SongDetails>> {
        let url = self.info_url(group, title);
        info!(group, title, "Looking up song details");

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.retry.max_attempts {
            match self.fetch_once(&url).await {
                Ok(result) => {
                    debug!(group, title, found = result.is_some(), "Lookup completed");
                    return Ok(result);
                }
                Err(e) => {
                    attempts += 1;
                    warn!(group, title, attempt = attempts, error = %e, "Lookup attempt failed");
                    last_error = Some(e);

                    if attempts < self.retry.max_attempts {
                        tokio::time::sleep(self.retry.backoff_duration(attempts)).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            MetadataError::LookupFailed("all retry attempts exhausted".to_string())
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(base: &str) -> HttpSongInfoProvider {
        HttpSongInfoProvider::new(base, "song-library/0.1").unwrap()
    }

    #[test]
    fn test_info_url_encodes_query_values() {
        let provider = provider("https://api.example.com");
        assert_eq!(
            provider.info_url("Muse", "Supermassive Black Hole"),
            "https://api.example.com/info?group=Muse&song=Supermassive%20Black%20Hole"
        );
    }

    #[test]
    fn test_base_url_trailing_slash_is_normalized() {
        let provider = provider("https://api.example.com/");
        assert!(provider
            .info_url("a", "b")
            .starts_with("https://api.example.com/info?"));
    }

    #[test]
    fn test_backoff_grows_and_caps() {
        let retry = RetryConfig::default();
        assert_eq!(retry.backoff_duration(1).as_millis(), 200);
        assert_eq!(retry.backoff_duration(2).as_millis(), 400);
        assert_eq!(retry.backoff_duration(20).as_millis(), 10_000);
    }
}
