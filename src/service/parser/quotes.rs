//! Expert quote candidates
//!
//! A candidate is quoted text with a capitalised two-word name and a title or
//! organisation cue close by, or a `<blockquote>` with a named attribution.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::{dedup_key, excerpt, window, Detection, PageView};
use crate::dom;
use crate::model::Snippet;

/// Characters searched on each side of a quote for its attribution
const ATTRIBUTION_WINDOW: usize = 160;

static QUOTED_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"["“„«]([^"“”„«»\n]{20,400})["”»]"#).unwrap()
});

static PERSON_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\p{Lu}\p{Ll}+(?:\s+(?:van|de|der|den|von|da|di|le|la|ter))*\s+\p{Lu}[\p{Ll}'\-]+(?:\s+\p{Lu}[\p{Ll}'\-]+)?")
        .unwrap()
});

static TITLE_CUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:ceo|cto|cfo|coo|cmo|vp|founder|co-founder|director|professor|prof\.|dr\.|head of|manager|expert|analyst|researcher|lead|president|chief|vice president|consultant|specialist|author|editor|scientist|economist|engineer|partner|strategist|directeur|oprichter|hoogleraar|onderzoeker)\b|\bat\s+\p{Lu}",
    )
    .unwrap()
});

pub(crate) fn detect(page: &PageView<'_>) -> Detection {
    let mut detection = Detection::default();
    let mut seen = HashSet::new();

    for block in &page.blocks {
        for caps in QUOTED_TEXT.captures_iter(block) {
            let (Some(whole), Some(quote)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let (before, after) = window(block, whole.start(), whole.end(), ATTRIBUTION_WINDOW);

            let Some(attribution) = attribution(after).or_else(|| attribution(before)) else {
                continue;
            };

            if seen.insert(dedup_key(quote.as_str())) {
                detection.push(Snippet::with_context(excerpt(quote.as_str()), attribution));
            }
        }
    }

    if let Some(selector) = dom::selector("blockquote") {
        for element in page.document.select(&selector) {
            let cite = dom::selector("cite, footer, figcaption")
                .and_then(|s| element.select(&s).next())
                .map(|c| dom::element_text(&c))
                .or_else(|| element.value().attr("cite").map(str::to_string));

            let Some(cite) = cite.filter(|c| PERSON_NAME.is_match(c)) else {
                continue;
            };

            let text = dom::element_text(&element);
            let stripped = text.replace(&cite, "");
            let quote = match QUOTED_TEXT.captures(&stripped).and_then(|c| c.get(1)) {
                Some(inner) => inner.as_str(),
                None => stripped
                    .trim()
                    .trim_matches(|c| matches!(c, '"' | '“' | '”' | '—' | '-')),
            };
            if quote.chars().count() < 20 {
                continue;
            }
            if seen.insert(dedup_key(quote)) {
                detection.push(Snippet::with_context(excerpt(quote), excerpt(&cite)));
            }
        }
    }

    detection
}

/// Named attribution with a title or organisation cue, if present in `text`
fn attribution(text: &str) -> Option<String> {
    let name = PERSON_NAME.find(text)?;
    if !TITLE_CUE.is_match(text) {
        return None;
    }
    let (_, tail) = text.split_at(name.start());
    let line: String = tail.chars().take(120).collect();
    Some(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::super::{parse_content, ParseContext};
    use crate::model::{JudgedCategory, Signal};

    fn parse(html: &str) -> crate::model::RawExtraction {
        parse_content(html, &ParseContext::new(None, 2025))
    }

    #[test]
    fn test_quote_with_named_title_is_a_candidate() {
        let html = r#"<p>“Content that answers real questions always wins in search,” says Maria Jansen, Head of SEO at Contentbureau.</p>"#;
        let extraction = parse(html);

        assert_eq!(extraction.counts.get(Signal::ExpertQuotes), 1);
        let snippet = &extraction.snippets_for(JudgedCategory::ExpertQuotes)[0];
        assert!(snippet.text.starts_with("Content that answers"));
        assert!(snippet.context.as_deref().unwrap().contains("Maria Jansen"));
    }

    #[test]
    fn test_quote_without_named_person_is_ignored() {
        let html = r#"<p>"Experts say that content is king and always will be," according to many people.</p>"#;
        assert_eq!(parse(html).counts.get(Signal::ExpertQuotes), 0);
    }

    #[test]
    fn test_short_quoted_phrase_is_ignored() {
        let html = r#"<p>The so-called "quick win" was mentioned by John Smith, CEO of Acme.</p>"#;
        assert_eq!(parse(html).counts.get(Signal::ExpertQuotes), 0);
    }

    #[test]
    fn test_blockquote_with_cite() {
        let html = r#"<blockquote><p>Structured data is the cheapest ranking lever most sites ignore.</p>
            <cite>Peter de Vries, Technical SEO Consultant</cite></blockquote>"#;
        let extraction = parse(html);
        assert_eq!(extraction.counts.get(Signal::ExpertQuotes), 1);
        let snippet = &extraction.snippets_for(JudgedCategory::ExpertQuotes)[0];
        assert!(snippet.text.contains("Structured data"));
        assert_eq!(
            snippet.context.as_deref(),
            Some("Peter de Vries, Technical SEO Consultant")
        );
    }

    #[test]
    fn test_same_quote_is_counted_once() {
        let html = r#"<blockquote>“Good content earns links without asking for them,” said Anna Smit, founder of Linkwise.
            <cite>Anna Smit, founder of Linkwise</cite></blockquote>"#;
        assert_eq!(parse(html).counts.get(Signal::ExpertQuotes), 1);
    }
}
