//! Judge response extraction and reconciliation

use std::collections::BTreeSet;

use serde_json::Value;

use crate::model::{CategoryVerdict, JudgeVerdict, JudgedCategory, Rejection};

/// Reason attached to rejections synthesised to balance the accounting
pub const UNCONFIRMED_REASON: &str = "Not confirmed by the judge";

/// Deserialize the first well-formed JSON object naming a judged category
///
/// Surrounding commentary, code fences and unrelated objects are ignored.
/// Errors carry a short description suitable for `fallback_reason`.
pub fn extract_verdict(text: &str) -> Result<JudgeVerdict, String> {
    for (start, _) in text.match_indices('{') {
        let mut values = serde_json::Deserializer::from_str(&text[start..]).into_iter::<Value>();
        let Some(Ok(value)) = values.next() else {
            continue;
        };
        if !names_a_category(&value) {
            continue;
        }
        return serde_json::from_value::<JudgeVerdict>(value)
            .map_err(|e| format!("verdict has unexpected shape: {}", e));
    }
    Err("no verdict object in judge response".to_string())
}

fn names_a_category(value: &Value) -> bool {
    value.as_object().is_some_and(|object| {
        JudgedCategory::ALL
            .iter()
            .any(|c| object.contains_key(&c.to_string()))
    })
}

/// Force a category verdict into containment and accounting against `raw`
///
/// Rejections with duplicate or out-of-range indexes are dropped and the
/// validated count is capped at what remains. Any shortfall is filled with
/// synthesised rejections, first at candidates beyond the `shown` samples the
/// judge saw, then at the lowest unused sample indexes. The result always
/// satisfies `validated + rejections.len() == raw`.
pub fn reconcile(
    category: JudgedCategory,
    raw: u32,
    shown: u32,
    verdict: &CategoryVerdict,
) -> (u32, Vec<Rejection>) {
    let mut used = BTreeSet::new();
    let mut rejections = Vec::new();
    let mut dropped = 0usize;

    for r in &verdict.rejections {
        if r.index < raw && used.insert(r.index) {
            rejections.push(Rejection {
                index: r.index,
                reason: r.reason.clone(),
            });
        } else {
            dropped += 1;
        }
    }

    let rejected = u32::try_from(rejections.len()).unwrap_or(u32::MAX);
    let validated = verdict.validated.min(raw.saturating_sub(rejected));
    let shortfall = raw - validated - rejected;

    if shortfall > 0 {
        let shown = shown.min(raw);
        let unused = (shown..raw)
            .chain(0..shown)
            .filter(|i| !used.contains(i))
            .take(shortfall as usize);
        rejections.extend(unused.map(|index| Rejection {
            index,
            reason: UNCONFIRMED_REASON.to_string(),
        }));
    }
    rejections.sort_by_key(|r| r.index);

    if dropped > 0 || shortfall > 0 || validated != verdict.validated {
        tracing::warn!(
            category = %category,
            raw = raw,
            reported_validated = verdict.validated,
            reported_rejections = verdict.rejections.len(),
            dropped_rejections = dropped,
            synthesised_rejections = shortfall,
            validated = validated,
            "Judge verdict disagreed with raw count, reconciled"
        );
    }

    (validated, rejections)
}
