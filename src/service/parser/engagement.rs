//! Actionability, trend and trust signals

use std::sync::LazyLock;

use regex::Regex;

use super::PageView;
use crate::dom;
use crate::model::{Signal, SignalCounts};

static STEP_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:step|stap)\s*\d+\b").unwrap());

static EXAMPLE_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:for example|for instance|e\.g\.|example:|such as|bijvoorbeeld|zoals)").unwrap()
});

static CTA_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:sign up|get started|start|try|download|subscribe|contact|book|buy|order|request|register|join|claim|get your|aanmelden|probeer|bestel|vraag|neem contact|schrijf je in|start nu)\b",
    )
    .unwrap()
});

static TOOL_MENTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:tools?|resources?|templates?|checklists?|calculators?|plugins?|spreadsheets?)\b").unwrap()
});

static TRENDING_TOPIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:AI|artificial intelligence|kunstmatige intelligentie|ChatGPT|generative|voice search|zero-click|E-E-A-T|SGE|AI overviews?|trending|latest trends?)\b",
    )
    .unwrap()
});

static AUTHOR_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:about the author|written by|over de auteur|geschreven door)\b").unwrap()
});

static CREDENTIAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:PhD|Ph\.D\.|MBA|MSc|CPA|CFA)\b|(?i:\b(?:certified|licensed|accredited|award-winning|\d+\+? years of experience|\d+ jaar ervaring|gecertificeerd)\b)",
    )
    .unwrap()
});

pub(crate) fn count_signals(page: &PageView<'_>, counts: &mut SignalCounts) {
    let doc = &page.document;

    let steps = dom::count(doc, "ol > li")
        + dom::texts(doc, "h2, h3, h4, h5, h6, strong")
            .iter()
            .filter(|t| STEP_HEADING.is_match(t))
            .count();
    counts.set_usize(Signal::StepByStep, steps);

    counts.set_usize(Signal::Examples, EXAMPLE_PHRASE.find_iter(&page.text).count());

    let ctas = dom::selector("button, a, input[type=\"submit\"]")
        .map(|s| {
            doc.select(&s)
                .filter(|el| {
                    let styled = el
                        .value()
                        .attr("class")
                        .is_some_and(|c| c.contains("cta") || c.contains("btn") || c.contains("button"));
                    let text = el
                        .value()
                        .attr("value")
                        .map(str::to_string)
                        .unwrap_or_else(|| dom::element_text(el));
                    styled || CTA_TEXT.is_match(&text)
                })
                .count()
        })
        .unwrap_or(0);
    counts.set_usize(Signal::Ctas, ctas);

    let tools = dom::texts(doc, "h2, h3, h4, a")
        .iter()
        .filter(|t| TOOL_MENTION.is_match(t))
        .count();
    counts.set_usize(Signal::ToolsResources, tools);

    counts.set_usize(Signal::TrendingTopics, TRENDING_TOPIC.find_iter(&page.text).count());

    let has_author = page.schema.has_author
        || dom::count(doc, "[rel=\"author\"], [class*=\"author\"], address") > 0
        || AUTHOR_PHRASE.is_match(&page.text);
    counts.set(Signal::AuthorBio, u32::from(has_author));

    counts.set_usize(Signal::Credentials, CREDENTIAL.find_iter(&page.text).count());

    let testimonials = dom::count(doc, "[class*=\"testimonial\"], [class*=\"review\"]")
        + usize::from(page.schema.has_type("Review"));
    counts.set_usize(Signal::Testimonials, testimonials);
}
