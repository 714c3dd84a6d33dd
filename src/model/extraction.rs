use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::signals::{JudgedCategory, SignalCounts};

/// Parser output for one scanned page
///
/// `snippets` may be a capped sample of what was counted; the true count lives
/// in `counts` and is always reported to the judge separately.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawExtraction {
    #[serde(default)]
    pub counts: SignalCounts,
    #[serde(default)]
    pub snippets: BTreeMap<JudgedCategory, Vec<Snippet>>,
    #[serde(default)]
    pub metadata: PageMetadata,
}

impl RawExtraction {
    /// Snippets for a category, empty when the parser produced none
    pub fn snippets_for(&self, category: JudgedCategory) -> &[Snippet] {
        self.snippets
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Short text excerpt offered to the judge as evidence for one candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub text: String,
    /// Attribution for quotes, source cue for statistics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl Snippet {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            context: None,
        }
    }

    pub fn with_context(text: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            context: Some(context.into()),
        }
    }
}

/// Page-level facts gathered by the parser
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageMetadata {
    pub title: Option<String>,
    pub h1_count: u32,
    pub h2_count: u32,
    pub h3_count: u32,
    pub meta_description_length: u32,
    pub meta_keywords_length: u32,
    pub schema_types: Vec<String>,
    pub canonical_url: Option<String>,
    pub language: Option<String>,
    /// Most frequent content term, used for the relevance signals
    pub primary_keyword: Option<String>,
}
