//! Prompts for quality validation

use std::fmt::Write;

use crate::model::{JudgeVerdict, JudgedCategory, RawExtraction};

/// System prompt for quality validation
pub const VALIDATION_SYSTEM_PROMPT: &str = r#"You are a quality validator for SEO content analysis. A deterministic parser has flagged candidate elements on a web page. Your task is to decide which candidates genuinely meet the quality criteria for their category.

## Validation Criteria

**Expert Quotes** - VALID only if:
1. A real person is named (first and last name)
2. The person has a title, position or organisation
3. It is an actual quotation, not a paraphrase
- "Experts say...", "Studies show..." and other anonymous attributions are INVALID

**Statistics** - VALID only if:
1. There is a clear number, percentage or amount
2. A source is cited nearby (organisation, study, report or publication)
- Generic or unsourced numbers ("5 tips", "many people") are INVALID

**Case Studies** - VALID only if:
1. A specific company or person is named
2. Concrete results are given (%, currency, timeframe)
- Hypothetical scenarios ("could", "might", "imagine") are INVALID

**FAQ Entries** - VALID only if:
1. It is a real question a reader would ask
2. A substantive answer is provided, not a teaser or a link

## Counting Rules

- Each category lists the parser's TOTAL count and a numbered SAMPLE of candidates (indexes start at 0).
- Reject candidates by sample index, with a short factual reason per rejection.
- Every rejection index must refer to a distinct sample shown to you.
- The validated count covers the TOTAL, not only the sample. When the total exceeds the sample, apply the acceptance rate you observed in the sample to the unseen candidates.
- validated plus the number of rejections must never exceed the total.
- A category with a total of 0 has validated 0 and no rejections.

## Output Requirements

Respond ONLY with one JSON object matching the schema in the request. No commentary."#;

/// Build the user prompt listing counts and indexed samples per judged category
pub fn build_validation_prompt(extraction: &RawExtraction) -> String {
    let mut prompt = String::from("Validate the following parser candidates.\n");

    for category in JudgedCategory::ALL {
        let total = extraction.counts.get(category.signal());
        let samples = extraction.snippets_for(category);

        let _ = write!(
            prompt,
            "\n## {} ({})\nTOTAL: {}\nSAMPLES SHOWN: {}\n",
            category.label(),
            category,
            total,
            samples.len()
        );

        if samples.is_empty() {
            prompt.push_str("(none)\n");
            continue;
        }

        for (index, snippet) in samples.iter().enumerate() {
            let text = snippet.text.replace('\n', " ");
            match (&snippet.context, category) {
                (Some(context), JudgedCategory::ExpertQuotes) => {
                    let _ = writeln!(prompt, "{}. \"{}\" - {}", index, text, context);
                }
                (Some(context), JudgedCategory::Statistics) => {
                    let _ = writeln!(prompt, "{}. {} (Source cue: {})", index, text, context);
                }
                (Some(context), JudgedCategory::FaqCount) => {
                    let _ = writeln!(prompt, "{}. Q: {} A: {}", index, text, context);
                }
                (Some(context), JudgedCategory::CaseStudies) => {
                    let _ = writeln!(prompt, "{}. {} (Named: {})", index, text, context);
                }
                (None, _) => {
                    let _ = writeln!(prompt, "{}. {}", index, text);
                }
            }
        }
    }

    let schema = schemars::schema_for!(JudgeVerdict);
    let schema = serde_json::to_string_pretty(&schema).unwrap_or_default();
    let _ = write!(
        prompt,
        "\n## Response Schema\nRespond with a JSON object matching this schema. \
         Use the category keys expertQuotes, statistics, caseStudies and faqCount.\n{}\n",
        schema
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Signal, SignalCounts, Snippet};

    #[test]
    fn test_prompt_lists_true_count_and_sample_size() {
        let mut counts = SignalCounts::zeroed();
        counts.set(Signal::Statistics, 40);
        counts.set(Signal::ExpertQuotes, 1);

        let mut extraction = RawExtraction {
            counts,
            ..RawExtraction::default()
        };
        extraction.snippets.insert(
            JudgedCategory::Statistics,
            vec![
                Snippet::with_context("61% of marketers agree.", "According to HubSpot"),
                Snippet::new("12,000 customers were surveyed."),
            ],
        );
        extraction.snippets.insert(
            JudgedCategory::ExpertQuotes,
            vec![Snippet::with_context("Content wins.", "Maria Jansen, CEO")],
        );

        let prompt = build_validation_prompt(&extraction);

        assert!(prompt.contains("## Statistics (statistics)\nTOTAL: 40\nSAMPLES SHOWN: 2"));
        assert!(prompt.contains("0. 61% of marketers agree. (Source cue: According to HubSpot)"));
        assert!(prompt.contains("1. 12,000 customers were surveyed."));
        assert!(prompt.contains("0. \"Content wins.\" - Maria Jansen, CEO"));
        assert!(prompt.contains("## Case Studies (caseStudies)\nTOTAL: 0\nSAMPLES SHOWN: 0\n(none)"));
        assert!(prompt.contains("Response Schema"));
        assert!(prompt.contains("validated"));
    }

    #[test]
    fn test_empty_extraction_still_lists_every_category() {
        let prompt = build_validation_prompt(&RawExtraction::default());
        for category in JudgedCategory::ALL {
            assert!(prompt.contains(category.label()));
        }
    }
}
