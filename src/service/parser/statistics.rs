//! Statistics, source citations and freshness of cited data

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::{dedup_key, excerpt, Detection, PageView};
use crate::dom;
use crate::model::{Signal, SignalCounts, Snippet};

static STAT_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)
        [$€£¥]\s?\d[\d.,]*(?:\s?(?:million|billion|trillion|[kmb]n?))?
        | \b\d+(?:[.,]\d+)?\s?(?:%|percent\b|procent\b)
        | \b\d+(?:[.,]\d+)?\s?(?:million|billion|trillion|miljoen|miljard)\b
        | \b\d{1,3}(?:,\d{3})+\b
        | \b\d+(?:\.\d+)?x\b
        | \b\d+\s+(?:out\s+of|in\s+every|of\s+every)\s+\d+\b
        ",
    )
    .unwrap()
});

static SOURCE_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:according to|source:|sources:|study|studies|survey|report|research|data from|analysis|poll|census|found that|shows that|published by|volgens|onderzoek|bron)\b",
    )
    .unwrap()
});

static CITATION_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:according to|source:|sources:|cited by|as reported by|data from|volgens|bron:)")
        .unwrap()
});

static YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").unwrap());

static ACRONYM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\p{Lu}{2,}\b").unwrap());

static NAMED_ORG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^.!?]\s+(\p{Lu}[\p{L}&]+(?:\s+\p{Lu}[\p{L}&]+)*)").unwrap());

/// Sentence-level candidates: a concrete number with a source cue nearby
pub(crate) fn detect(page: &PageView<'_>) -> Detection {
    let mut detection = Detection::default();
    let mut seen = HashSet::new();

    for sentence in &page.sentences {
        if !STAT_TOKEN.is_match(sentence) {
            continue;
        }
        let Some(cue) = source_cue(sentence) else {
            continue;
        };
        if seen.insert(dedup_key(sentence)) {
            detection.push(Snippet::with_context(excerpt(sentence), cue));
        }
    }

    detection
}

pub(crate) fn count_signals(page: &PageView<'_>, counts: &mut SignalCounts) {
    let citations = dom::count(&page.document, "cite") + CITATION_PHRASE.find_iter(&page.text).count();
    counts.set_usize(Signal::SourceCitations, citations);

    let year = page.context.reference_year;
    let current_year_mentions = YEAR
        .find_iter(&page.text)
        .filter(|m| m.as_str().parse::<i32>().is_ok_and(|y| y == year))
        .count();
    counts.set_usize(Signal::CurrentYearMentions, current_year_mentions);

    let recent = page
        .sentences
        .iter()
        .filter(|s| STAT_TOKEN.is_match(s))
        .filter(|s| {
            YEAR.find_iter(s)
                .filter_map(|m| m.as_str().parse::<i32>().ok())
                .any(|y| (year - 2..=year).contains(&y))
        })
        .count();
    counts.set_usize(Signal::DataRecency, recent);
}

/// The phrase or name that attributes a statistic, if any
fn source_cue(sentence: &str) -> Option<String> {
    if let Some(m) = SOURCE_PHRASE.find(sentence) {
        let tail: String = sentence[m.start()..].chars().take(80).collect();
        return Some(tail.trim().to_string());
    }
    if let Some(m) = ACRONYM.find(sentence) {
        return Some(m.as_str().to_string());
    }
    if let Some(name) = NAMED_ORG.captures(sentence).and_then(|c| c.get(1)) {
        return Some(name.as_str().to_string());
    }
    YEAR.find(sentence).map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::super::{parse_content, ParseContext};
    use crate::model::{JudgedCategory, Signal};

    fn parse(html: &str) -> crate::model::RawExtraction {
        parse_content(html, &ParseContext::new(None, 2025))
    }

    #[test]
    fn test_sourced_percentage_is_a_candidate() {
        let extraction = parse("<p>According to HubSpot, 61% of marketers call SEO their top priority.</p>");
        assert_eq!(extraction.counts.get(Signal::Statistics), 1);

        let snippet = &extraction.snippets_for(JudgedCategory::Statistics)[0];
        assert!(snippet.text.contains("61%"));
        assert!(snippet.context.as_deref().unwrap().starts_with("According to HubSpot"));
    }

    #[test]
    fn test_unsourced_or_plain_numbers_are_ignored() {
        let html = "<p>many people like about 50% of things.</p><p>Follow these 5 steps today.</p>";
        assert_eq!(parse(html).counts.get(Signal::Statistics), 0);
    }

    #[test]
    fn test_currency_and_large_numbers() {
        let html = "<p>The Forrester report puts the market at $4.5 billion.</p>\
                    <p>We surveyed 12,000 customers for this study.</p>";
        assert_eq!(parse(html).counts.get(Signal::Statistics), 2);
    }

    #[test]
    fn test_source_citations_and_freshness() {
        let html = r#"<p>According to Statista, 72% of shoppers compare prices in 2025.</p>
            <p>A 2024 survey found 40% growth.</p>
            <p>Back in 2015 the figure was 10% according to older data.</p>
            <p>Plans for 2025 are ambitious.</p>
            <p><cite>Content Marketing Institute</cite></p>"#;
        let counts = parse(html).counts;

        assert_eq!(counts.get(Signal::SourceCitations), 3);
        assert_eq!(counts.get(Signal::CurrentYearMentions), 2);
        assert_eq!(counts.get(Signal::DataRecency), 2);
    }
}
