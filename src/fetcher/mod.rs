//! Page fetcher: retrieves a URL's HTML, visible text and page metadata

mod http;
mod pool;

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::model::{FetchedPage, FetcherConfig, WaitCondition};

pub use http::HttpPageFetcher;
pub use pool::{PageLease, PagePool};

/// Pages shorter than this are treated as empty
pub const MIN_CONTENT_LENGTH: usize = 100;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum FetchError {
    #[error("URL must start with http:// or https://: {0}")]
    InvalidUrl(String),

    #[error("URL blocked by configuration: {0}")]
    Blocked(String),

    #[error("Too many concurrent pages ({0} in use), please wait")]
    Busy(usize),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Page content is too small or empty ({0} bytes)")]
    EmptyContent(usize),

    #[error("Page content exceeds the {0} byte limit")]
    TooLarge(usize),
}

/// Per-fetch options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    pub timeout_ms: u64,
    pub wait_condition: WaitCondition,
    pub post_load_delay_ms: u64,
}

impl FetchOptions {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for FetchOptions {
    fn default() -> Self {
        FetchOptions::from(&FetcherConfig::default())
    }
}

impl From<&FetcherConfig> for FetchOptions {
    fn from(config: &FetcherConfig) -> Self {
        Self {
            timeout_ms: config.timeout_ms,
            wait_condition: config.wait_condition,
            post_load_delay_ms: config.post_load_delay_ms,
        }
    }
}

/// Trait for page fetchers
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the page at `url`
    async fn fetch(&self, url: &Url, options: &FetchOptions) -> Result<FetchedPage, FetchError>;
}

/// Parse a scan target, accepting only http(s) URLs
pub fn parse_target(raw: &str) -> Result<Url, FetchError> {
    let url = Url::parse(raw.trim()).map_err(|_| FetchError::InvalidUrl(raw.to_string()))?;
    ensure_http(&url)?;
    Ok(url)
}

fn ensure_http(url: &Url) -> Result<(), FetchError> {
    match url.scheme() {
        "http" | "https" => Ok(()),
        _ => Err(FetchError::InvalidUrl(url.to_string())),
    }
}

/// Count whitespace-separated words
pub fn word_count(text: &str) -> u32 {
    u32::try_from(text.split_whitespace().count()).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_target_accepts_http_and_https() {
        assert!(parse_target("https://example.com/page").is_ok());
        assert!(parse_target(" http://example.com ").is_ok());
    }

    #[test]
    fn test_parse_target_rejects_other_schemes() {
        assert!(matches!(
            parse_target("ftp://example.com/file"),
            Err(FetchError::InvalidUrl(_))
        ));
        assert!(matches!(
            parse_target("example.com"),
            Err(FetchError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("  one two\nthree\t four "), 4);
    }

    #[test]
    fn test_options_from_config() {
        let options = FetchOptions::default();
        assert_eq!(options.timeout(), Duration::from_secs(30));
        assert_eq!(options.wait_condition, WaitCondition::NetworkIdle);
        assert_eq!(options.post_load_delay_ms, 2000);
    }
}
