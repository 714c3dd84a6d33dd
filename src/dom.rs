//! HTML helpers shared by the page fetcher and the content parser

use scraper::{ElementRef, Html, Node, Selector};

/// Elements whose text never reaches a reader
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template", "head"];

/// Elements treated as text blocks
const BLOCK_SELECTOR: &str =
    "p, li, blockquote, h1, h2, h3, h4, h5, h6, td, th, dt, dd, figcaption, summary, pre";

const BLOCK_ELEMENTS: &[&str] = &[
    "p",
    "li",
    "blockquote",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "td",
    "th",
    "dt",
    "dd",
    "figcaption",
    "summary",
    "pre",
];

/// Parse a CSS selector, `None` when the selector is invalid
pub fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

/// Number of elements matching `css`
pub fn count(document: &Html, css: &str) -> usize {
    selector(css)
        .map(|s| document.select(&s).count())
        .unwrap_or(0)
}

/// Collected text of an element with whitespace collapsed
pub fn element_text(element: &ElementRef<'_>) -> String {
    normalize_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

/// Texts of all elements matching `css`, skipping empty ones
pub fn texts(document: &Html, css: &str) -> Vec<String> {
    let Some(selector) = selector(css) else {
        return Vec::new();
    };
    document
        .select(&selector)
        .map(|el| element_text(&el))
        .filter(|t| !t.is_empty())
        .collect()
}

/// Reader-visible text of the document, script/style/noscript removed
pub fn visible_text(document: &Html) -> String {
    let mut parts = Vec::new();

    for node in document.tree.nodes() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|a| {
            a.value()
                .as_element()
                .is_some_and(|e| HIDDEN_ELEMENTS.contains(&e.name()))
        });
        if hidden {
            continue;
        }
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            parts.push(trimmed);
        }
    }

    normalize_whitespace(&parts.join(" "))
}

/// Text of the outermost block elements, in document order
pub fn block_texts(document: &Html) -> Vec<String> {
    let Some(selector) = selector(BLOCK_SELECTOR) else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter(|el| {
            !el.ancestors().any(|a| {
                a.value()
                    .as_element()
                    .is_some_and(|e| BLOCK_ELEMENTS.contains(&e.name()))
            })
        })
        .map(|el| element_text(&el))
        .filter(|t| !t.is_empty())
        .collect()
}

/// Content of `<meta name="...">`, matched case-insensitively on the name
pub fn meta_name(document: &Html, name: &str) -> Option<String> {
    let selector = selector("meta[name]")?;
    document
        .select(&selector)
        .find(|el| {
            el.value()
                .attr("name")
                .is_some_and(|n| n.eq_ignore_ascii_case(name))
        })
        .and_then(|el| el.value().attr("content"))
        .map(|s| s.trim().to_string())
}

/// Content of `<meta property="...">`
pub fn meta_property(document: &Html, property: &str) -> Option<String> {
    let selector = selector(&format!("meta[property=\"{}\"]", property))?;
    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|s| s.trim().to_string())
}

/// Text of `<title>`, falling back to og:title
pub fn title(document: &Html) -> Option<String> {
    if let Some(selector) = selector("title")
        && let Some(el) = document.select(&selector).next()
    {
        let title = element_text(&el);
        if !title.is_empty() {
            return Some(title);
        }
    }
    meta_property(document, "og:title").filter(|t| !t.is_empty())
}

/// First value of `attr` on an element matching `css`
pub fn attr(document: &Html, css: &str, attr: &str) -> Option<String> {
    let selector = selector(css)?;
    document
        .select(&selector)
        .find_map(|el| el.value().attr(attr))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Collapse runs of whitespace into single spaces and trim
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
