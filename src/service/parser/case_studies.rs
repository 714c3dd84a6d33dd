//! Case study candidates

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::{dedup_key, excerpt, Detection, PageView};
use crate::model::Snippet;

static CASE_STUDY_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:case[\s-]stud(?:y|ies)|customer stor(?:y|ies)|success stor(?:y|ies)|client stor(?:y|ies)|klantcase|praktijkvoorbeeld)\b")
        .unwrap()
});

static RESULT_VERB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:increased|grew|boosted|raised|reduced|improved|saved|doubled|tripled|cut|generated|achieved|gained|lowered|verhoogde|verdubbelde|bespaarde|groeide)\b")
        .unwrap()
});

static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d").unwrap());

/// Capitalised name that does not start the sentence
static NAMED_ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\S\s+(\p{Lu}[\p{L}&'\-]+(?:\s+\p{Lu}[\p{L}&'\-]+)*)").unwrap()
});

pub(crate) fn detect(page: &PageView<'_>) -> Detection {
    let mut detection = Detection::default();
    let mut seen = HashSet::new();

    for sentence in &page.sentences {
        let named = NAMED_ENTITY
            .captures(sentence)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string());

        let is_candidate = CASE_STUDY_PHRASE.is_match(sentence)
            || (RESULT_VERB.is_match(sentence) && NUMBER.is_match(sentence) && named.is_some());

        if !is_candidate || !seen.insert(dedup_key(sentence)) {
            continue;
        }

        let snippet = match named {
            Some(name) => Snippet::with_context(excerpt(sentence), name),
            None => Snippet::new(excerpt(sentence)),
        };
        detection.push(snippet);
    }

    detection
}
