//! Judge-facing verdict schema
//!
//! The judge is asked to answer with one JSON object of this shape; the schema
//! is embedded in the prompt.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::signals::JudgedCategory;

/// Verdict for all judged categories
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct JudgeVerdict {
    pub expert_quotes: Option<CategoryVerdict>,
    pub statistics: Option<CategoryVerdict>,
    pub case_studies: Option<CategoryVerdict>,
    pub faq_count: Option<CategoryVerdict>,
}

impl JudgeVerdict {
    pub fn category(&self, category: JudgedCategory) -> Option<&CategoryVerdict> {
        match category {
            JudgedCategory::ExpertQuotes => self.expert_quotes.as_ref(),
            JudgedCategory::Statistics => self.statistics.as_ref(),
            JudgedCategory::CaseStudies => self.case_studies.as_ref(),
            JudgedCategory::FaqCount => self.faq_count.as_ref(),
        }
    }
}

/// Verdict for one category
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CategoryVerdict {
    /// Number of candidates that meet the criteria
    pub validated: u32,
    /// One entry per rejected candidate
    #[serde(default)]
    pub rejections: Vec<RejectionVerdict>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RejectionVerdict {
    pub index: u32,
    pub reason: String,
}
