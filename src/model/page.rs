//! Fetched page as handed over by the page fetcher

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// Rendered page content plus page-level metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchedPage {
    pub url: Url,
    pub html: String,
    pub text_content: String,
    pub word_count: u32,
    pub metadata: FetchMetadata,
    pub duration_seconds: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FetchMetadata {
    pub title: String,
    pub h1_count: u32,
    pub h2_count: u32,
    pub h3_count: u32,
    pub image_count: u32,
    pub link_count: u32,
    pub description: String,
    pub keywords: String,
    pub og_title: String,
    pub og_description: String,
    pub canonical: String,
    pub language: String,
    pub viewport: String,
}
