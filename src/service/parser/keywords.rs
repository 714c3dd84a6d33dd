//! Primary keyword and keyword placement
//!
//! The primary keyword is the first `<meta name="keywords">` entry when present,
//! otherwise the most frequent non-stopword of four or more letters (ties go to
//! the alphabetically smallest word).

use std::collections::BTreeMap;

use regex::Regex;

use super::PageView;
use crate::dom;
use crate::model::{Signal, SignalCounts};

const MIN_KEYWORD_LEN: usize = 4;
const INTRO_WORDS: usize = 100;
const LSI_MIN_FREQUENCY: usize = 3;

const STOPWORDS: &[&str] = &[
    // English
    "about", "above", "after", "again", "also", "been", "before", "being", "below", "between",
    "both", "could", "does", "doing", "down", "during", "each", "even", "every", "from", "further",
    "have", "having", "here", "into", "just", "like", "made", "make", "many", "more", "most",
    "much", "must", "only", "other", "ours", "over", "same", "should", "some", "such", "than",
    "that", "their", "theirs", "them", "then", "there", "these", "they", "this", "those",
    "through", "under", "until", "very", "want", "were", "what", "when", "where", "which",
    "while", "will", "with", "would", "your", "yours",
    // Dutch
    "aan", "alle", "alles", "als", "andere", "buiten", "daar", "daarom", "door", "deze", "dit",
    "doen", "drie", "echter", "eens", "geen", "heeft", "hebben", "hier", "hierbij", "hoe",
    "kunnen", "maar", "meer", "meest", "niet", "onder", "ons", "onze", "over", "tegen", "toch",
    "tussen", "veel", "voor", "waar", "wanneer", "want", "welke", "werd", "wordt", "worden",
    "zich", "zijn", "zoals", "zonder", "zullen",
];

pub(crate) fn count_signals(page: &PageView<'_>, counts: &mut SignalCounts) -> Option<String> {
    let frequencies = term_frequencies(&page.text);

    let keyword = dom::meta_name(&page.document, "keywords")
        .and_then(|k| k.split(',').next().map(|s| s.trim().to_lowercase()))
        .filter(|k| !k.is_empty())
        .or_else(|| most_frequent(&frequencies))?;

    let pattern = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(&keyword))).ok()?;

    let in_title = dom::title(&page.document).is_some_and(|t| pattern.is_match(&t));
    counts.set(Signal::KeywordInTitle, u32::from(in_title));

    let intro = page
        .text
        .split_whitespace()
        .take(INTRO_WORDS)
        .collect::<Vec<_>>()
        .join(" ");
    counts.set(Signal::KeywordInIntro, u32::from(pattern.is_match(&intro)));

    counts.set_usize(Signal::KeywordMentions, pattern.find_iter(&page.text).count());

    let in_headings = dom::texts(&page.document, "h1, h2, h3")
        .iter()
        .filter(|h| pattern.is_match(h))
        .count();
    counts.set_usize(Signal::KeywordInHeadings, in_headings);

    let related = frequencies
        .iter()
        .filter(|(term, freq)| {
            **freq >= LSI_MIN_FREQUENCY && !keyword.split_whitespace().any(|k| k == term.as_str())
        })
        .count();
    counts.set_usize(Signal::LsiKeywords, related);

    Some(keyword)
}

fn term_frequencies(text: &str) -> BTreeMap<String, usize> {
    let mut frequencies = BTreeMap::new();
    for word in text.split(|c: char| !c.is_alphanumeric() && c != '-') {
        let word = word.trim_matches('-').to_lowercase();
        if word.chars().count() < MIN_KEYWORD_LEN
            || !word.chars().any(char::is_alphabetic)
            || STOPWORDS.contains(&word.as_str())
        {
            continue;
        }
        *frequencies.entry(word).or_insert(0) += 1;
    }
    frequencies
}

/// Highest frequency wins; the map's ordering breaks ties alphabetically
fn most_frequent(frequencies: &BTreeMap<String, usize>) -> Option<String> {
    let mut best: Option<(&String, usize)> = None;
    for (term, &freq) in frequencies {
        if best.is_none_or(|(_, f)| freq > f) {
            best = Some((term, freq));
        }
    }
    best.map(|(term, _)| term.clone())
}
