//! Plain HTTP page fetcher
//!
//! Downloads the served HTML without executing scripts. The wait condition and
//! post-load delay are rendering hints for browser-backed fetchers and are only
//! recorded here.

use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use scraper::Html;
use url::Url;

use super::{
    ensure_http, word_count, FetchError, FetchOptions, PageFetcher, PagePool, MIN_CONTENT_LENGTH,
};
use crate::dom;
use crate::model::{FetchMetadata, FetchedPage, FetcherConfig, UrlPolicy};

pub struct HttpPageFetcher {
    client: Client,
    policy: UrlPolicy,
    pool: PagePool,
    max_body_bytes: usize,
}

impl HttpPageFetcher {
    pub fn new(config: &FetcherConfig) -> Result<Self, FetchError> {
        if !config.policy.allow.is_empty() {
            tracing::info!(allow = ?config.policy.allow, "Fetcher whitelist configured");
        }
        if !config.policy.deny.is_empty() {
            tracing::info!(deny = ?config.policy.deny, "Fetcher blacklist configured");
        }

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            policy: config.policy.clone(),
            pool: PagePool::new(config.max_concurrent_pages),
            max_body_bytes: config.max_body_bytes,
        })
    }

    pub fn pool(&self) -> &PagePool {
        &self.pool
    }

    async fn download(&self, url: &Url, options: &FetchOptions) -> Result<String, FetchError> {
        let mut response = self
            .client
            .get(url.as_str())
            .timeout(options.timeout())
            .send()
            .await
            .map_err(|e| timeout_or_http(e, options))?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        if let Some(length) = response.content_length()
            && length > self.max_body_bytes as u64
        {
            return Err(FetchError::TooLarge(self.max_body_bytes));
        }

        // Content-Length may be absent or wrong, so the limit is enforced while reading
        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| timeout_or_http(e, options))?
        {
            if body.len() + chunk.len() > self.max_body_bytes {
                return Err(FetchError::TooLarge(self.max_body_bytes));
            }
            body.extend_from_slice(&chunk);
        }

        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

fn timeout_or_http(error: reqwest::Error, options: &FetchOptions) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout(options.timeout())
    } else {
        FetchError::Http(error)
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &Url, options: &FetchOptions) -> Result<FetchedPage, FetchError> {
        ensure_http(url)?;

        if !self.policy.is_url_allowed(url) {
            tracing::debug!(url = %url, "URL blocked by configuration");
            return Err(FetchError::Blocked(url.to_string()));
        }

        let _lease = self.pool.try_acquire()?;
        let start = Instant::now();

        tracing::debug!(
            url = %url,
            timeout_ms = options.timeout_ms,
            wait_condition = ?options.wait_condition,
            post_load_delay_ms = options.post_load_delay_ms,
            pages_in_use = self.pool.in_use(),
            "Fetching page"
        );

        let html = self.download(url, options).await?;

        if html.trim().len() < MIN_CONTENT_LENGTH {
            return Err(FetchError::EmptyContent(html.trim().len()));
        }

        let document = Html::parse_document(&html);
        let text_content = dom::visible_text(&document);
        let word_count = word_count(&text_content);
        let metadata = extract_metadata(&document);
        let duration_seconds = start.elapsed().as_secs_f64();

        tracing::info!(
            url = %url,
            word_count = word_count,
            duration_seconds = duration_seconds,
            "Fetch complete"
        );

        Ok(FetchedPage {
            url: url.clone(),
            html,
            text_content,
            word_count,
            metadata,
            duration_seconds,
            timestamp: Utc::now(),
        })
    }
}

/// Page-level metadata as a browser would report it
pub(crate) fn extract_metadata(document: &Html) -> FetchMetadata {
    let count = |css: &str| u32::try_from(dom::count(document, css)).unwrap_or(u32::MAX);

    FetchMetadata {
        title: dom::title(document).unwrap_or_default(),
        h1_count: count("h1"),
        h2_count: count("h2"),
        h3_count: count("h3"),
        image_count: count("img"),
        link_count: count("a"),
        description: dom::meta_name(document, "description").unwrap_or_default(),
        keywords: dom::meta_name(document, "keywords").unwrap_or_default(),
        og_title: dom::meta_property(document, "og:title").unwrap_or_default(),
        og_description: dom::meta_property(document, "og:description").unwrap_or_default(),
        canonical: dom::attr(document, "link[rel=\"canonical\"]", "href").unwrap_or_default(),
        language: dom::attr(document, "html", "lang").unwrap_or_default(),
        viewport: dom::meta_name(document, "viewport").unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    #[test]
    fn test_extract_metadata() {
        let html = r#"<html lang="nl"><head>
            <title>Content scoring guide</title>
            <meta name="description" content="How we score content">
            <meta name="keywords" content="seo, content">
            <meta name="viewport" content="width=device-width, initial-scale=1">
            <meta property="og:title" content="OG title">
            <link rel="canonical" href="https://example.com/guide">
          </head><body>
            <h1>Guide</h1><h2>One</h2><h2>Two</h2><h3>Sub</h3>
            <img src="a.png"><a href="/x">x</a><a href="/y">y</a>
          </body></html>"#;
        let doc = Html::parse_document(html);
        let meta = extract_metadata(&doc);

        assert_eq!(meta.title, "Content scoring guide");
        assert_eq!(meta.h1_count, 1);
        assert_eq!(meta.h2_count, 2);
        assert_eq!(meta.h3_count, 1);
        assert_eq!(meta.image_count, 1);
        assert_eq!(meta.link_count, 2);
        assert_eq!(meta.description, "How we score content");
        assert_eq!(meta.keywords, "seo, content");
        assert_eq!(meta.og_title, "OG title");
        assert_eq!(meta.canonical, "https://example.com/guide");
        assert_eq!(meta.language, "nl");
        assert!(meta.viewport.contains("device-width"));
    }

    #[tokio::test]
    async fn test_blocked_url_never_touches_the_network() {
        let config = FetcherConfig {
            policy: UrlPolicy {
                allow: vec![],
                deny: vec!["blocked.test".to_string()],
            },
            ..FetcherConfig::default()
        };
        let fetcher = HttpPageFetcher::new(&config).unwrap();
        let url = Url::parse("https://blocked.test/page").unwrap();

        let result = fetcher.fetch(&url, &FetchOptions::default()).await;
        assert!(matches!(result, Err(FetchError::Blocked(_))));
        assert_eq!(fetcher.pool().in_use(), 0);
    }

    #[test]
    fn test_invalid_user_agent_fails_construction() {
        let config = FetcherConfig {
            user_agent: "broken\nagent".to_string(),
            ..FetcherConfig::default()
        };
        assert!(matches!(HttpPageFetcher::new(&config), Err(FetchError::Http(_))));
    }

    /// Serve one canned HTTP response on a local port
    async fn serve_once(body: String, declare_length: bool) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await;
            let head = if declare_length {
                format!(
                    "HTTP/1.1 200 OK\r\ncontent-type: text/html\r\ncontent-length: {}\r\nconnection: close\r\n\r\n",
                    body.len()
                )
            } else {
                "HTTP/1.1 200 OK\r\ncontent-type: text/html\r\nconnection: close\r\n\r\n".to_string()
            };
            let _ = socket.write_all(head.as_bytes()).await;
            let _ = socket.write_all(body.as_bytes()).await;
            let _ = socket.shutdown().await;
        });
        Url::parse(&format!("http://{}/page", addr)).unwrap()
    }

    fn page_of(bytes: usize) -> String {
        format!("<html><body><p>{}</p></body></html>", "word ".repeat(bytes / 5))
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let config = FetcherConfig {
            max_body_bytes: 1_000,
            ..FetcherConfig::default()
        };
        let fetcher = HttpPageFetcher::new(&config).unwrap();

        for declare_length in [true, false] {
            let url = serve_once(page_of(5_000), declare_length).await;
            let result = fetcher.fetch(&url, &FetchOptions::default()).await;
            assert!(
                matches!(result, Err(FetchError::TooLarge(1_000))),
                "declared length {}: {:?}",
                declare_length,
                result.map(|p| p.word_count)
            );
        }
        assert_eq!(fetcher.pool().in_use(), 0);
    }

    #[tokio::test]
    async fn test_body_within_limit_is_fetched() {
        let fetcher = HttpPageFetcher::new(&FetcherConfig::default()).unwrap();
        let url = serve_once(page_of(500), false).await;

        let page = fetcher.fetch(&url, &FetchOptions::default()).await.unwrap();
        assert_eq!(page.word_count, 100);
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_fetch_live_page() {
        let fetcher = HttpPageFetcher::new(&FetcherConfig::default()).unwrap();
        let url = Url::parse("https://www.wikipedia.org").unwrap();
        let page = fetcher.fetch(&url, &FetchOptions::default()).await.unwrap();
        assert!(page.word_count > 0);
        assert!(!page.metadata.title.is_empty());
    }
}
