use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::signals::JudgedCategory;

/// Validator output
///
/// When `fallback_used` is false, for every judged category
/// `validated_counts[c] + rejections[c].len() == raw count of c`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub validated_counts: BTreeMap<JudgedCategory, u32>,
    pub rejections: BTreeMap<JudgedCategory, Vec<Rejection>>,
    pub fallback_used: bool,
    /// Why the judge's verdict could not be used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

impl ValidationResult {
    pub fn validated(&self, category: JudgedCategory) -> u32 {
        self.validated_counts.get(&category).copied().unwrap_or(0)
    }

    pub fn rejections_for(&self, category: JudgedCategory) -> &[Rejection] {
        self.rejections
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn total_rejections(&self) -> usize {
        self.rejections.values().map(Vec::len).sum()
    }
}

/// One candidate the judge rejected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    /// Zero-based position of the candidate in the parser's ordering
    pub index: u32,
    pub reason: String,
}
