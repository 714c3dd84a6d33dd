//! Content parser
//!
//! Turns fetched HTML into a `RawExtraction`: one count per catalogued signal
//! plus evidence snippets for the judged categories. Detection favours recall;
//! the quality validator filters false positives. Parsing never fails, and
//! unmatched or malformed content yields zero counts.

use std::collections::BTreeMap;

use scraper::Html;
use url::Url;

use crate::dom;
use crate::model::{JudgedCategory, RawExtraction, Signal, SignalCounts, Snippet};

mod case_studies;
mod engagement;
mod faq;
mod keywords;
mod links;
mod quotes;
mod readability;
mod schema;
mod statistics;
mod structure;

use schema::SchemaMarkup;

/// Default number of snippets kept per judged category
pub const DEFAULT_SNIPPET_CAP: usize = 15;

/// Maximum characters kept per snippet
const SNIPPET_CHARS: usize = 240;

/// Inputs besides the HTML itself
///
/// The reference year is passed in so parsing stays a pure function of its
/// inputs.
#[derive(Debug, Clone)]
pub struct ParseContext {
    /// Source URL, used to tell internal from external links
    pub url: Option<Url>,
    pub reference_year: i32,
    pub snippet_cap: usize,
}

impl ParseContext {
    pub fn new(url: Option<Url>, reference_year: i32) -> Self {
        Self {
            url,
            reference_year,
            snippet_cap: DEFAULT_SNIPPET_CAP,
        }
    }

    pub fn with_snippet_cap(mut self, cap: usize) -> Self {
        self.snippet_cap = cap;
        self
    }
}

/// Candidates found for one judged category
#[derive(Debug, Default)]
pub(crate) struct Detection {
    pub count: usize,
    pub snippets: Vec<Snippet>,
}

impl Detection {
    pub(crate) fn push(&mut self, snippet: Snippet) {
        self.count += 1;
        self.snippets.push(snippet);
    }
}

/// Parsed page shared by all detectors
pub(crate) struct PageView<'a> {
    pub document: Html,
    /// Reader-visible text blocks in document order
    pub blocks: Vec<String>,
    /// Blocks joined with newlines
    pub text: String,
    pub sentences: Vec<String>,
    pub schema: SchemaMarkup,
    pub context: &'a ParseContext,
}

impl<'a> PageView<'a> {
    fn new(html: &str, context: &'a ParseContext) -> Self {
        let document = Html::parse_document(html);

        let mut blocks = dom::block_texts(&document);
        if blocks.is_empty() {
            let text = dom::visible_text(&document);
            if !text.is_empty() {
                blocks.push(text);
            }
        }

        let text = blocks.join("\n");
        let sentences = blocks.iter().flat_map(|b| split_sentences(b)).collect();
        let schema = SchemaMarkup::from_document(&document);

        Self {
            document,
            blocks,
            text,
            sentences,
            schema,
            context,
        }
    }
}

/// Parse fetched HTML into raw signal counts and evidence snippets
pub fn parse_content(html: &str, context: &ParseContext) -> RawExtraction {
    let page = PageView::new(html, context);
    let mut counts = SignalCounts::zeroed();
    let mut snippets = BTreeMap::new();

    let judged = [
        (JudgedCategory::ExpertQuotes, quotes::detect(&page)),
        (JudgedCategory::Statistics, statistics::detect(&page)),
        (JudgedCategory::CaseStudies, case_studies::detect(&page)),
        (JudgedCategory::FaqCount, faq::detect(&page)),
    ];

    for (category, mut detection) in judged {
        counts.set_usize(category.signal(), detection.count);
        detection.snippets.truncate(context.snippet_cap);
        snippets.insert(category, detection.snippets);
    }

    statistics::count_signals(&page, &mut counts);
    faq::count_signals(&page, &mut counts);
    links::count_signals(&page, &mut counts);
    engagement::count_signals(&page, &mut counts);
    readability::count_signals(&page, &mut counts);
    let primary_keyword = keywords::count_signals(&page, &mut counts);
    structure::count_signals(&page, &mut counts);

    counts.set(Signal::WordCount, crate::fetcher::word_count(&page.text));

    let metadata = structure::page_metadata(&page, primary_keyword);

    tracing::debug!(
        url = ?context.url.as_ref().map(Url::as_str),
        expert_quotes = counts.get(Signal::ExpertQuotes),
        statistics = counts.get(Signal::Statistics),
        case_studies = counts.get(Signal::CaseStudies),
        faq_count = counts.get(Signal::FaqCount),
        word_count = counts.get(Signal::WordCount),
        "Parsed page content"
    );

    RawExtraction {
        counts,
        snippets,
        metadata,
    }
}

/// Split a block of text into sentences on terminal punctuation
pub(crate) fn split_sentences(block: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = block.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') && chars.peek().is_none_or(|n| n.is_whitespace()) {
            let sentence = current.trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            current.clear();
        }
    }

    let rest = current.trim();
    if !rest.is_empty() {
        sentences.push(rest.to_string());
    }
    sentences
}

/// Text surrounding `start..end`, at most `radius` bytes on each side
pub(crate) fn window(text: &str, start: usize, end: usize, radius: usize) -> (&str, &str) {
    let mut lo = start.saturating_sub(radius);
    while !text.is_char_boundary(lo) {
        lo -= 1;
    }
    let mut hi = end.saturating_add(radius).min(text.len());
    while !text.is_char_boundary(hi) {
        hi += 1;
    }
    (&text[lo..start], &text[end..hi])
}

/// Shorten text for use as a snippet
pub(crate) fn excerpt(text: &str) -> String {
    let text = text.trim();
    if text.chars().count() <= SNIPPET_CHARS {
        return text.to_string();
    }
    let mut short: String = text.chars().take(SNIPPET_CHARS).collect();
    short.push('…');
    short
}

/// Lowercase key used to de-duplicate candidates
pub(crate) fn dedup_key(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric())
        .take(60)
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> ParseContext {
        ParseContext::new(Url::parse("https://example.com/blog/post").ok(), 2025)
    }

    #[test]
    fn test_empty_input_yields_all_zero_counts() {
        let extraction = parse_content("", &context());
        for signal in Signal::ALL {
            assert_eq!(extraction.counts.get(signal), 0, "{} should be zero", signal);
        }
        for category in JudgedCategory::ALL {
            assert!(extraction.snippets_for(category).is_empty());
        }
        assert_eq!(extraction.metadata.title, None);
    }

    #[test]
    fn test_garbage_input_does_not_panic() {
        let inputs = [
            "<<<>>>",
            "<html><body><p>unterminated",
            "\u{0}\u{1}binary\u{fffd}",
            "<script>{{{{</script>",
            "“",
        ];
        for input in inputs {
            let extraction = parse_content(input, &context());
            assert_eq!(extraction.counts.iter().count(), Signal::ALL.len());
        }
    }

    #[test]
    fn test_snippets_are_capped_but_count_is_not() {
        let mut html = String::from("<html><body>");
        for i in 0..40 {
            html.push_str(&format!(
                "<p>According to Gartner, {}% of marketers plan to invest more.</p>",
                i + 10
            ));
        }
        html.push_str("</body></html>");

        let ctx = context().with_snippet_cap(15);
        let extraction = parse_content(&html, &ctx);

        assert_eq!(extraction.counts.get(Signal::Statistics), 40);
        assert_eq!(extraction.snippets_for(JudgedCategory::Statistics).len(), 15);
    }

    #[test]
    fn test_parse_is_deterministic() {
        let html = r#"<html><head><title>Guide to content scoring in 2025</title></head>
            <body><h1>Content scoring</h1><p>Content scoring matters. According to HubSpot, 61% of marketers agree.</p></body></html>"#;
        let a = parse_content(html, &context());
        let b = parse_content(html, &context());
        assert_eq!(a.counts, b.counts);
        assert_eq!(a.snippets, b.snippets);
        assert_eq!(a.metadata, b.metadata);
    }

    #[test]
    fn test_split_sentences() {
        let sentences = split_sentences("First one. Second one! Third? Version 2.5 ships now");
        assert_eq!(
            sentences,
            vec!["First one.", "Second one!", "Third?", "Version 2.5 ships now"]
        );
    }

    #[test]
    fn test_window_respects_char_boundaries() {
        let text = "ééééé quote ééééé";
        let start = text.find("quote").unwrap();
        let end = start + "quote".len();
        let (before, after) = window(text, start, end, 3);
        assert!(before.len() <= 4);
        assert!(after.len() <= 4);
    }

    #[test]
    fn test_excerpt_truncates_long_text() {
        let long = "word ".repeat(200);
        let short = excerpt(&long);
        assert!(short.chars().count() <= SNIPPET_CHARS + 1);
        assert!(short.ends_with('…'));
        assert_eq!(excerpt(" short "), "short");
    }
}
