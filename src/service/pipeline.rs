//! Scan pipeline: fetch, parse, validate, score
//!
//! Stages run strictly in order. Only a fetch failure (or a malformed judge
//! response under the strict policy) aborts a scan; judge unavailability
//! degrades to parser counts.

use std::sync::Arc;

use chrono::Datelike;
use url::Url;

use crate::fetcher::{FetchError, FetchOptions, PageFetcher, parse_target};
use crate::model::{ScanResult, Signal, ValidationSummary};
use crate::service::cache::ScanCache;
use crate::service::cache_keys::generate_scan_cache_key;
use crate::service::parser::{DEFAULT_SNIPPET_CAP, ParseContext, parse_content};
use crate::service::scoring::{quality_label, score};
use crate::service::validator::{QualityValidator, ValidationError};

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PipelineError {
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
}

/// Runs scans end to end, optionally serving fresh snapshots from a cache
pub struct ScanPipeline {
    fetcher: Arc<dyn PageFetcher>,
    validator: QualityValidator,
    options: FetchOptions,
    snippet_cap: usize,
    cache: Option<(ScanCache, String)>,
}

impl ScanPipeline {
    pub fn new(fetcher: Arc<dyn PageFetcher>, validator: QualityValidator, options: FetchOptions) -> Self {
        Self {
            fetcher,
            validator,
            options,
            snippet_cap: DEFAULT_SNIPPET_CAP,
            cache: None,
        }
    }

    /// Serve and store results through `cache`; `model_id` versions the key
    pub fn with_cache(mut self, cache: ScanCache, model_id: impl Into<String>) -> Self {
        self.cache = Some((cache, model_id.into()));
        self
    }

    pub fn with_snippet_cap(mut self, cap: usize) -> Self {
        self.snippet_cap = cap;
        self
    }

    /// Scan one URL
    pub async fn run_pipeline(&self, url: &str) -> Result<ScanResult, PipelineError> {
        let target = parse_target(url)?;

        let cache_key = self
            .cache
            .as_ref()
            .map(|(_, model_id)| generate_scan_cache_key(&target, model_id));

        if let Some(ref key) = cache_key
            && let Some(mut cached) = self.get_cached(key).await
        {
            tracing::info!(url = %target, score = cached.score, "Serving scan from cache");
            cached.cached = true;
            return Ok(cached);
        }

        let result = self.scan(&target).await?;

        if let Some(ref key) = cache_key {
            if is_cacheable(&result) {
                self.store(key, &result).await;
            } else {
                tracing::debug!(url = %target, "Skipping cache for unvalidated scan");
            }
        }

        Ok(result)
    }

    async fn scan(&self, url: &Url) -> Result<ScanResult, PipelineError> {
        tracing::info!(url = %url, "Starting scan");

        let page = self.fetcher.fetch(url, &self.options).await?;

        let context = ParseContext::new(Some(url.clone()), page.timestamp.year())
            .with_snippet_cap(self.snippet_cap);
        let mut extraction = parse_content(&page.html, &context);
        extraction.counts.set(Signal::WordCount, page.word_count);

        let validation = self.validator.validate(&extraction).await?;

        let breakdown = score(&validation, &extraction.counts);
        let label = quality_label(breakdown.total);

        tracing::info!(
            url = %url,
            score = breakdown.total,
            quality_label = %label,
            fallback_used = validation.fallback_used,
            word_count = page.word_count,
            "Scan complete"
        );

        Ok(ScanResult {
            url: page.url,
            score: breakdown.total,
            quality_label: label,
            breakdown,
            validation: ValidationSummary {
                parser_counts: extraction.counts,
                validated_counts: validation.validated_counts,
                rejections: validation.rejections,
                fallback_used: validation.fallback_used,
                fallback_reason: validation.fallback_reason,
            },
            metadata: page.metadata,
            page_metadata: extraction.metadata,
            word_count: page.word_count,
            fetch_duration_seconds: page.duration_seconds,
            timestamp: page.timestamp,
            cached: false,
        })
    }

    async fn get_cached(&self, key: &str) -> Option<ScanResult> {
        let (cache, _) = self.cache.as_ref()?;
        match cache.get_scan::<ScanResult>(key).await {
            Ok(result) => Some(result),
            Err(crate::service::cache::CacheError::Miss(_)) => None,
            Err(e) => {
                tracing::debug!(error = %e, "Scan cache lookup failed");
                None
            }
        }
    }

    async fn store(&self, key: &str, result: &ScanResult) {
        if let Some((ref cache, _)) = self.cache
            && let Err(e) = cache.set_scan(key, result).await
        {
            tracing::debug!(error = %e, "Failed to cache scan result");
        }
    }
}

/// Only judge-validated results are cached, so a judge outage is not pinned
/// for the whole TTL
fn is_cacheable(result: &ScanResult) -> bool {
    !result.validation.fallback_used
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::model::{FetchMetadata, FetchedPage, JudgedCategory, MalformedPolicy, QualityLabel};
    use crate::service::validator::{Judge, JudgeError, JudgeRequest, UnavailableJudge};

    const ARTICLE: &str = r#"<html lang="en"><head><title>Content scoring guide for marketing teams in 2025</title></head><body>
        <h1>Content scoring</h1>
        <p>“Content that answers real questions always wins in search,” says Maria Jansen, Head of SEO at Contentbureau.</p>
        <p>“Most teams publish far too much and measure far too little,” said Tom Bakker, CEO of Groeimeter.</p>
        <p>According to HubSpot, 61% of marketers call content scoring a priority in 2025.</p>
        <h2>How content scoring works</h2>
        <p>Content scoring rates pages on quality signals.</p>
        </body></html>"#;

    struct StubFetcher {
        html: Option<&'static str>,
        calls: Mutex<usize>,
    }

    impl StubFetcher {
        fn serving(html: &'static str) -> Arc<Self> {
            Arc::new(Self {
                html: Some(html),
                calls: Mutex::new(0),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                html: None,
                calls: Mutex::new(0),
            })
        }

        fn calls(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl PageFetcher for StubFetcher {
        async fn fetch(&self, url: &Url, _options: &FetchOptions) -> Result<FetchedPage, FetchError> {
            *self.calls.lock().unwrap() += 1;
            let html = self.html.ok_or_else(|| FetchError::Status {
                status: 404,
                url: url.to_string(),
            })?;
            Ok(FetchedPage {
                url: url.clone(),
                html: html.to_string(),
                text_content: String::new(),
                word_count: 321,
                metadata: FetchMetadata {
                    title: "Content scoring guide".to_string(),
                    ..FetchMetadata::default()
                },
                duration_seconds: 0.5,
                timestamp: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
            })
        }
    }

    struct CannedJudge(&'static str);

    #[async_trait]
    impl Judge for CannedJudge {
        async fn judge(&self, _request: &JudgeRequest) -> Result<String, JudgeError> {
            Ok(self.0.to_string())
        }

        fn name(&self) -> &str {
            "canned"
        }
    }

    fn pipeline(fetcher: Arc<StubFetcher>, judge: Arc<dyn Judge>, policy: MalformedPolicy) -> ScanPipeline {
        ScanPipeline::new(fetcher, QualityValidator::new(judge, policy), FetchOptions::default())
    }

    #[tokio::test]
    async fn test_unavailable_judge_scores_parser_counts() {
        let fetcher = StubFetcher::serving(ARTICLE);
        let judge = Arc::new(UnavailableJudge::new("no API key"));
        let result = pipeline(fetcher.clone(), judge, MalformedPolicy::Fallback)
            .run_pipeline("https://example.com/guide")
            .await
            .unwrap();

        assert!(result.validation.fallback_used);
        assert!(!result.is_ai_validated());
        assert_eq!(result.word_count, 321);
        assert_eq!(result.validation.parser_counts.get(Signal::WordCount), 321);
        assert_eq!(result.validation.parser_counts.get(Signal::ExpertQuotes), 2);
        assert_eq!(result.validation.validated_counts[&JudgedCategory::ExpertQuotes], 2);
        assert_eq!(result.score, result.breakdown.total);
        assert_eq!(result.quality_label, quality_label(result.score));
        assert_eq!(
            result.breakdown.metric("credibility", Signal::ExpertQuotes).unwrap().points,
            3
        );
        assert!(!result.cached);
        assert_eq!(fetcher.calls(), 1);
        assert!(!is_cacheable(&result));
    }

    #[tokio::test]
    async fn test_parser_page_metadata_reaches_the_result() {
        let result = pipeline(
            StubFetcher::serving(ARTICLE),
            Arc::new(UnavailableJudge::new("x")),
            MalformedPolicy::Fallback,
        )
        .run_pipeline("https://example.com/guide")
        .await
        .unwrap();

        let page = &result.page_metadata;
        assert_eq!(
            page.title.as_deref(),
            Some("Content scoring guide for marketing teams in 2025")
        );
        assert_eq!(page.language.as_deref(), Some("en"));
        assert_eq!(page.h1_count, 1);
        assert_eq!(page.h2_count, 1);
        assert!(page.primary_keyword.is_some());

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["pageMetadata"]["language"], "en");
    }

    #[tokio::test]
    async fn test_judge_rejections_lower_the_score() {
        let verdict = r#"{"expertQuotes": {"validated": 1, "rejections": [{"index": 1, "reason": "No title"}]},
                          "statistics": {"validated": 1, "rejections": []}}"#;
        let validated = pipeline(
            StubFetcher::serving(ARTICLE),
            Arc::new(CannedJudge(verdict)),
            MalformedPolicy::Fallback,
        )
        .run_pipeline("https://example.com/guide")
        .await
        .unwrap();

        let unvalidated = pipeline(
            StubFetcher::serving(ARTICLE),
            Arc::new(UnavailableJudge::new("offline")),
            MalformedPolicy::Fallback,
        )
        .run_pipeline("https://example.com/guide")
        .await
        .unwrap();

        assert!(validated.is_ai_validated());
        assert!(is_cacheable(&validated));
        assert_eq!(validated.validation.validated_counts[&JudgedCategory::ExpertQuotes], 1);
        assert_eq!(validated.score + 1, unvalidated.score);
    }

    #[tokio::test]
    async fn test_fetch_failure_aborts_the_scan() {
        let fetcher = StubFetcher::failing();
        let error = pipeline(fetcher, Arc::new(UnavailableJudge::new("x")), MalformedPolicy::Fallback)
            .run_pipeline("https://example.com/missing")
            .await
            .unwrap_err();

        assert!(matches!(error, PipelineError::Fetch(FetchError::Status { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_invalid_url_never_reaches_the_fetcher() {
        let fetcher = StubFetcher::serving(ARTICLE);
        let error = pipeline(fetcher.clone(), Arc::new(UnavailableJudge::new("x")), MalformedPolicy::Fallback)
            .run_pipeline("javascript:alert(1)")
            .await
            .unwrap_err();

        assert!(matches!(error, PipelineError::Fetch(FetchError::InvalidUrl(_))));
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_strict_policy_surfaces_malformed_verdict() {
        let error = pipeline(
            StubFetcher::serving(ARTICLE),
            Arc::new(CannedJudge("no json here")),
            MalformedPolicy::Strict,
        )
        .run_pipeline("https://example.com/guide")
        .await
        .unwrap_err();

        assert!(matches!(error, PipelineError::Validation(ValidationError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_blank_page_scores_poor() {
        let result = pipeline(
            StubFetcher::serving("<html><body></body></html>"),
            Arc::new(UnavailableJudge::new("x")),
            MalformedPolicy::Fallback,
        )
        .run_pipeline("https://example.com/blank")
        .await
        .unwrap();

        assert_eq!(result.score, 0);
        assert_eq!(result.quality_label, QualityLabel::Poor);
    }
}
