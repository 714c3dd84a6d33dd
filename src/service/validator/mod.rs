//! Quality validation service
//!
//! Reduces raw judged-category counts to validated counts through an external
//! judge. A validated count never exceeds its raw count. Judge failures fall
//! back to the raw counts so a scan always completes.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::model::{JudgedCategory, MalformedPolicy, RawExtraction, Rejection, ValidationResult};

pub mod error;
pub mod judge;
pub mod prompts;
pub mod response;

pub use error::{JudgeError, ValidationError};
pub use judge::{Judge, JudgeRequest, LlmJudge, UnavailableJudge};

use prompts::{VALIDATION_SYSTEM_PROMPT, build_validation_prompt};
use response::{extract_verdict, reconcile};

/// Validates parser candidates with an external judge
#[derive(Clone)]
pub struct QualityValidator {
    judge: Arc<dyn Judge>,
    policy: MalformedPolicy,
}

impl QualityValidator {
    pub fn new(judge: Arc<dyn Judge>, policy: MalformedPolicy) -> Self {
        tracing::info!(judge = judge.name(), policy = ?policy, "Quality validator initialized");
        Self { judge, policy }
    }

    /// Validate the judged categories of an extraction
    ///
    /// Judge unavailability always yields a fallback result. A malformed
    /// response yields a fallback under `MalformedPolicy::Fallback` and an error
    /// under `MalformedPolicy::Strict`.
    pub async fn validate(
        &self,
        extraction: &RawExtraction,
    ) -> Result<ValidationResult, ValidationError> {
        match self.try_validate(extraction).await {
            Ok(result) => Ok(result),
            Err(ValidationError::Malformed(reason)) if self.policy == MalformedPolicy::Strict => {
                tracing::error!(reason = %reason, "Judge response malformed, failing validation");
                Err(ValidationError::Malformed(reason))
            }
            Err(e) => {
                tracing::warn!(
                    judge = self.judge.name(),
                    error = %e,
                    "Validation failed, falling back to parser counts"
                );
                Ok(fallback(extraction, e.to_string()))
            }
        }
    }

    async fn try_validate(
        &self,
        extraction: &RawExtraction,
    ) -> Result<ValidationResult, ValidationError> {
        let raw = |c: JudgedCategory| extraction.counts.get(c.signal());

        if JudgedCategory::ALL.iter().all(|c| raw(*c) == 0) {
            tracing::debug!("No judged candidates, skipping judge call");
            return Ok(validated_result(
                JudgedCategory::ALL.iter().map(|c| (*c, 0, Vec::new())),
            ));
        }

        let request = JudgeRequest {
            system: VALIDATION_SYSTEM_PROMPT.to_string(),
            prompt: build_validation_prompt(extraction),
        };

        let response = self.judge.judge(&request).await?;
        let verdict = extract_verdict(&response).map_err(ValidationError::Malformed)?;

        let mut categories = Vec::with_capacity(JudgedCategory::ALL.len());
        for category in JudgedCategory::ALL {
            let raw_count = raw(category);
            let shown = u32::try_from(extraction.snippets_for(category).len()).unwrap_or(u32::MAX);
            match verdict.category(category) {
                Some(v) => {
                    let (validated, rejections) = reconcile(category, raw_count, shown, v);
                    categories.push((category, validated, rejections));
                }
                None if raw_count == 0 => categories.push((category, 0, Vec::new())),
                None => {
                    return Err(ValidationError::Malformed(format!(
                        "verdict is missing category {}",
                        category
                    )));
                }
            }
        }

        let result = validated_result(categories);

        tracing::info!(
            judge = self.judge.name(),
            validated = ?result.validated_counts,
            rejections = result.total_rejections(),
            "Validation complete"
        );

        Ok(result)
    }
}

fn validated_result(
    categories: impl IntoIterator<Item = (JudgedCategory, u32, Vec<Rejection>)>,
) -> ValidationResult {
    let mut validated_counts = BTreeMap::new();
    let mut rejections = BTreeMap::new();
    for (category, validated, rejected) in categories {
        validated_counts.insert(category, validated);
        rejections.insert(category, rejected);
    }
    ValidationResult {
        validated_counts,
        rejections,
        fallback_used: false,
        fallback_reason: None,
    }
}

/// Raw counts passed through unvalidated
pub fn fallback(extraction: &RawExtraction, reason: impl Into<String>) -> ValidationResult {
    ValidationResult {
        validated_counts: JudgedCategory::ALL
            .iter()
            .map(|c| (*c, extraction.counts.get(c.signal())))
            .collect(),
        rejections: JudgedCategory::ALL.iter().map(|c| (*c, Vec::new())).collect(),
        fallback_used: true,
        fallback_reason: Some(reason.into()),
    }
}
