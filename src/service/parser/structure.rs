//! Metadata, visuals, markup and page structure

use std::sync::LazyLock;

use regex::Regex;

use super::PageView;
use crate::dom;
use crate::model::{PageMetadata, Signal, SignalCounts};

/// Title characters beyond this are truncated in search results
const TITLE_CAP: usize = 60;
/// Description characters beyond this are truncated in search results
const DESCRIPTION_CAP: usize = 160;

static COMPARISON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:vs\.?|versus|compare|comparison|compared|vergelijking|vergelijk)\b|[✓✔✗✘]").unwrap()
});

static TOC_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:table of contents|contents|in this article|on this page|inhoudsopgave|inhoud)$").unwrap()
});

static UPDATED_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:last updated|updated on|laatst bijgewerkt|bijgewerkt op)\b").unwrap()
});

pub(crate) fn count_signals(page: &PageView<'_>, counts: &mut SignalCounts) {
    let doc = &page.document;

    let title_len = dom::title(doc).map(|t| t.chars().count()).unwrap_or(0);
    counts.set_usize(Signal::MetaTitleLength, title_len.min(TITLE_CAP));

    let desc_len = dom::meta_name(doc, "description")
        .map(|d| d.chars().count())
        .unwrap_or(0);
    counts.set_usize(Signal::MetaDescLength, desc_len.min(DESCRIPTION_CAP));

    let images_with_alt = dom::selector("img[alt]")
        .map(|s| {
            doc.select(&s)
                .filter(|img| img.value().attr("alt").is_some_and(|a| !a.trim().is_empty()))
                .count()
        })
        .unwrap_or(0);
    counts.set_usize(Signal::ImagesWithAlt, images_with_alt);

    let videos = dom::count(
        doc,
        "video, iframe[src*=\"youtube\"], iframe[src*=\"youtu.be\"], iframe[src*=\"vimeo\"], iframe[src*=\"wistia\"]",
    );
    counts.set_usize(Signal::Videos, videos);

    counts.set_usize(Signal::Tables, dom::count(doc, "table"));

    let comparison_tables = dom::selector("table")
        .map(|s| {
            doc.select(&s)
                .filter(|table| COMPARISON.is_match(&dom::element_text(table)))
                .count()
        })
        .unwrap_or(0);
    counts.set_usize(Signal::ComparisonTables, comparison_tables);

    counts.set_usize(Signal::SchemaTypes, page.schema.types.len());

    let hierarchy = dom::count(doc, "h1") == 1 && dom::count(doc, "h2") >= 1;
    counts.set(Signal::HeadingHierarchy, u32::from(hierarchy));

    counts.set(Signal::TableOfContents, u32::from(has_table_of_contents(page)));

    let responsive = dom::meta_name(doc, "viewport").is_some_and(|v| v.contains("width=device-width"));
    counts.set(Signal::MobileResponsive, u32::from(responsive));

    let published = page.schema.has_date_published
        || dom::count(doc, "meta[property=\"article:published_time\"], time[datetime]") > 0;
    counts.set(Signal::PublicationDate, u32::from(published));

    let modified = page.schema.has_date_modified
        || dom::count(
            doc,
            "meta[property=\"article:modified_time\"], meta[property=\"og:updated_time\"]",
        ) > 0
        || UPDATED_PHRASE.is_match(&page.text);
    counts.set(Signal::LastModified, u32::from(modified));
}

fn has_table_of_contents(page: &PageView<'_>) -> bool {
    let doc = &page.document;

    if dom::count(
        doc,
        "#toc, .toc, [class*=\"table-of-contents\"], [id*=\"table-of-contents\"], [class*=\"ez-toc\"]",
    ) > 0
    {
        return true;
    }

    if dom::texts(doc, "h2, h3, h4, strong, p")
        .iter()
        .any(|t| TOC_HEADING.is_match(t))
    {
        return true;
    }

    // A list of three or more same-page anchors
    dom::selector("nav, ul, ol")
        .map(|s| {
            doc.select(&s).any(|list| {
                dom::selector("a[href^=\"#\"]")
                    .map(|a| list.select(&a).count() >= 3)
                    .unwrap_or(false)
            })
        })
        .unwrap_or(false)
}

/// Page-level facts reported alongside the counts
pub(crate) fn page_metadata(page: &PageView<'_>, primary_keyword: Option<String>) -> PageMetadata {
    let doc = &page.document;
    let count = |css: &str| u32::try_from(dom::count(doc, css)).unwrap_or(u32::MAX);
    let chars = |s: Option<String>| s.map(|s| s.chars().count()).unwrap_or(0) as u32;

    PageMetadata {
        title: dom::title(doc),
        h1_count: count("h1"),
        h2_count: count("h2"),
        h3_count: count("h3"),
        meta_description_length: chars(dom::meta_name(doc, "description")),
        meta_keywords_length: chars(dom::meta_name(doc, "keywords")),
        schema_types: page.schema.types.iter().cloned().collect(),
        canonical_url: dom::attr(doc, "link[rel=\"canonical\"]", "href"),
        language: dom::attr(doc, "html", "lang"),
        primary_keyword,
    }
}
