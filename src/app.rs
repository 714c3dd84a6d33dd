//! Application state and service initialization
//!
//! Builds the scan pipeline from `Config`: fetcher, judge, validator and the
//! optional Redis cache.

use std::sync::Arc;

use crate::fetcher::{FetchError, FetchOptions, HttpPageFetcher};
use crate::model::Config;
use crate::service::llm::LlmError;
use crate::service::validator::{Judge, LlmJudge, UnavailableJudge};
use crate::service::{LlmClient, QualityValidator, ScanCache, ScanPipeline};

/// Startup switches that are not part of the config file
#[derive(Debug, Clone, Copy, Default)]
pub struct AppOptions {
    /// Skip the Redis cache even when it is reachable
    pub no_cache: bool,
}

/// Application state containing the wired pipeline
pub struct AppState {
    pub pipeline: ScanPipeline,
    /// Whether scores will be judge-validated or parser-only
    pub judge_available: bool,
}

impl AppState {
    /// Initialize all services and build application state
    ///
    /// A missing `OPENAI_API_KEY` is not fatal: scans then take the validator
    /// fallback path. An unreachable Redis disables caching.
    pub async fn new(config: Config, options: AppOptions) -> Result<Self, AppError> {
        let (judge, judge_available) = Self::build_judge(&config)?;
        let validator = QualityValidator::new(judge, config.validator.malformed_policy);

        let fetcher = Arc::new(HttpPageFetcher::new(&config.fetcher)?);

        let mut pipeline = ScanPipeline::new(fetcher, validator, FetchOptions::from(&config.fetcher))
            .with_snippet_cap(config.validator.snippet_cap);

        if options.no_cache {
            tracing::info!("Result cache disabled");
        } else {
            match ScanCache::new().await {
                Ok(cache) => {
                    tracing::info!(ttl_seconds = cache.ttl_seconds(), "Redis cache enabled");
                    pipeline = pipeline.with_cache(cache, config.validator.model.clone());
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Redis cache unavailable, running without cache");
                }
            }
        }

        Ok(Self {
            pipeline,
            judge_available,
        })
    }

    fn build_judge(config: &Config) -> Result<(Arc<dyn Judge>, bool), AppError> {
        match LlmClient::from_env() {
            Ok(client) => Ok((Arc::new(LlmJudge::new(client, &config.validator)), true)),
            Err(LlmError::MissingApiKey) => {
                tracing::warn!(
                    "OpenAI API key not found (OPENAI_API_KEY), scores will use unvalidated parser counts"
                );
                Ok((Arc::new(UnavailableJudge::new("OPENAI_API_KEY not configured")), false))
            }
            Err(e) => Err(AppError::InvalidConfig(e.to_string())),
        }
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// HTTP client could not be built from the fetcher config
    #[error("Failed to initialize page fetcher: {0}")]
    FetcherInit(#[from] FetchError),
}
