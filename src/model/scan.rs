use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use super::extraction::PageMetadata;
use super::page::FetchMetadata;
use super::score::{QualityLabel, ScoreBreakdown};
use super::signals::{JudgedCategory, SignalCounts};
use super::validation::Rejection;

/// Final result of one pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub url: Url,
    pub score: u32,
    pub quality_label: QualityLabel,
    pub breakdown: ScoreBreakdown,
    pub validation: ValidationSummary,
    pub metadata: FetchMetadata,
    /// Facts gathered by the parser: schema types, primary keyword, meta lengths
    #[serde(default)]
    pub page_metadata: PageMetadata,
    pub word_count: u32,
    pub fetch_duration_seconds: f64,
    pub timestamp: DateTime<Utc>,
    /// True when served from the result cache
    #[serde(default)]
    pub cached: bool,
}

impl ScanResult {
    /// Whether the score rests on judge-validated counts or on parser counts only
    pub fn is_ai_validated(&self) -> bool {
        !self.validation.fallback_used
    }
}

/// Parser counts next to what the judge kept
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub parser_counts: SignalCounts,
    pub validated_counts: BTreeMap<JudgedCategory, u32>,
    pub rejections: BTreeMap<JudgedCategory, Vec<Rejection>>,
    pub fallback_used: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}
