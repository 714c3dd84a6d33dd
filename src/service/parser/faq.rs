//! FAQ entries, FAQ markup and FAQ headings

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::ElementRef;

use super::{dedup_key, excerpt, Detection, PageView};
use crate::dom;
use crate::model::{Signal, SignalCounts, Snippet};

static FAQ_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:faqs?|frequently asked questions|common questions|veelgestelde vragen|veelgestelde vraag)\b")
        .unwrap()
});

/// Question and answer candidates from headings, `<details>`, definition
/// lists and FAQ structured data
pub(crate) fn detect(page: &PageView<'_>) -> Detection {
    let mut detection = Detection::default();
    let mut seen = HashSet::new();

    let mut push = |question: &str, answer: Option<String>| {
        if question.is_empty() || !seen.insert(dedup_key(question)) {
            return;
        }
        let snippet = match answer.filter(|a| !a.is_empty()) {
            Some(answer) => Snippet::with_context(excerpt(question), excerpt(&answer)),
            None => Snippet::new(excerpt(question)),
        };
        detection.push(snippet);
    };

    if let Some(selector) = dom::selector("h2, h3, h4, h5, h6, dt") {
        for element in page.document.select(&selector) {
            let question = dom::element_text(&element);
            if question.ends_with('?') {
                push(&question, next_element_text(&element));
            }
        }
    }

    if let Some(selector) = dom::selector("details > summary") {
        for summary in page.document.select(&selector) {
            let question = dom::element_text(&summary);
            let answer = summary
                .parent()
                .and_then(ElementRef::wrap)
                .map(|details| dom::element_text(&details))
                .and_then(|all| all.strip_prefix(question.as_str()).map(|a| a.trim().to_string()));
            push(&question, answer);
        }
    }

    for (question, answer) in &page.schema.questions {
        push(question, answer.clone());
    }

    detection.count = detection.count.max(page.schema.question_count);
    detection
}

pub(crate) fn count_signals(page: &PageView<'_>, counts: &mut SignalCounts) {
    let has_schema = page.schema.has_type("FAQPage") || page.schema.question_count > 0;
    counts.set(Signal::FaqSchema, u32::from(has_schema));

    let has_heading = dom::texts(&page.document, "h1, h2, h3, h4")
        .iter()
        .any(|h| FAQ_HEADING.is_match(h));
    counts.set(Signal::FaqHeading, u32::from(has_heading));
}

fn next_element_text(element: &ElementRef<'_>) -> Option<String> {
    element
        .next_siblings()
        .find_map(ElementRef::wrap)
        .map(|next| dom::element_text(&next))
}

#[cfg(test)]
mod tests {
    use super::super::{parse_content, ParseContext};
    use crate::model::{JudgedCategory, Signal};

    fn parse(html: &str) -> crate::model::RawExtraction {
        parse_content(html, &ParseContext::new(None, 2025))
    }

    #[test]
    fn test_structural_questions_with_answers() {
        let html = r#"<h2>Frequently asked questions</h2>
            <h3>How long does indexing take?</h3><p>Usually between a few days and two weeks.</p>
            <details><summary>Do I need a sitemap?</summary><p>Yes, for larger sites it helps crawlers.</p></details>
            <dl><dt>What is a canonical URL?</dt><dd>The preferred version of a page.</dd></dl>
            <h3>Pricing</h3>"#;
        let extraction = parse(html);

        assert_eq!(extraction.counts.get(Signal::FaqCount), 3);
        assert_eq!(extraction.counts.get(Signal::FaqHeading), 1);
        assert_eq!(extraction.counts.get(Signal::FaqSchema), 0);

        let snippets = extraction.snippets_for(JudgedCategory::FaqCount);
        assert_eq!(snippets[0].text, "How long does indexing take?");
        assert_eq!(
            snippets[0].context.as_deref(),
            Some("Usually between a few days and two weeks.")
        );
        assert_eq!(
            snippets[1].context.as_deref(),
            Some("The preferred version of a page.")
        );
        assert_eq!(
            snippets[2].context.as_deref(),
            Some("Yes, for larger sites it helps crawlers.")
        );
    }

    #[test]
    fn test_schema_questions_are_merged_without_double_counting() {
        let html = r#"<html><head><script type="application/ld+json">
            {"@type":"FAQPage","mainEntity":[
              {"@type":"Question","name":"How long does indexing take?","acceptedAnswer":{"@type":"Answer","text":"Days."}},
              {"@type":"Question","name":"Is SEO dead?","acceptedAnswer":{"@type":"Answer","text":"No."}}
            ]}</script></head>
            <body><h3>How long does indexing take?</h3><p>Usually days.</p></body></html>"#;
        let extraction = parse(html);

        assert_eq!(extraction.counts.get(Signal::FaqCount), 2);
        assert_eq!(extraction.counts.get(Signal::FaqSchema), 1);
    }
}
