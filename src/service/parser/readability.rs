//! Readability: Flesch reading ease and sentence/paragraph length

use super::PageView;
use crate::dom;
use crate::model::{Signal, SignalCounts};

const SHORT_SENTENCE_WORDS: usize = 20;
const SHORT_PARAGRAPH_WORDS: usize = 100;

pub(crate) fn count_signals(page: &PageView<'_>, counts: &mut SignalCounts) {
    let sentence_words: Vec<usize> = page
        .sentences
        .iter()
        .map(|s| s.split_whitespace().count())
        .filter(|n| *n > 0)
        .collect();

    let short = sentence_words
        .iter()
        .filter(|n| **n <= SHORT_SENTENCE_WORDS)
        .count();
    counts.set_usize(Signal::ShortSentences, short);

    let paragraphs = dom::texts(&page.document, "p")
        .iter()
        .map(|p| p.split_whitespace().count())
        .filter(|n| (1..=SHORT_PARAGRAPH_WORDS).contains(n))
        .count();
    counts.set_usize(Signal::ShortParagraphs, paragraphs);

    counts.set(Signal::ReadabilityScore, flesch_reading_ease(&page.text, sentence_words.len()));
}

/// Flesch reading ease clamped to 0..=100, zero when there is no text
pub(crate) fn flesch_reading_ease(text: &str, sentences: usize) -> u32 {
    let words: Vec<&str> = text
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphabetic()))
        .filter(|w| !w.is_empty())
        .collect();

    if words.is_empty() {
        return 0;
    }

    let word_count = words.len() as f64;
    let sentence_count = sentences.max(1) as f64;
    let syllables: usize = words.iter().map(|w| syllables(w)).sum();

    let score = 206.835 - 1.015 * (word_count / sentence_count) - 84.6 * (syllables as f64 / word_count);
    score.clamp(0.0, 100.0).round() as u32
}

/// Vowel-group syllable estimate, at least one per word
fn syllables(word: &str) -> usize {
    let lower = word.to_lowercase();
    let mut count = 0;
    let mut previous_vowel = false;

    for c in lower.chars() {
        let vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y' | 'à'..='ÿ');
        if vowel && !previous_vowel {
            count += 1;
        }
        previous_vowel = vowel;
    }

    if lower.ends_with('e') && !lower.ends_with("le") && count > 1 {
        count -= 1;
    }
    count.max(1)
}
