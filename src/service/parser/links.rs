//! Link profile: internal, external, authority and citation links

use std::sync::LazyLock;

use regex::Regex;
use scraper::{CaseSensitivity, ElementRef};
use url::Url;

use super::PageView;
use crate::dom;
use crate::model::{Signal, SignalCounts};

const AUTHORITY_SUFFIXES: &[&str] = &[
    ".gov",
    ".edu",
    ".gov.uk",
    ".ac.uk",
    ".europa.eu",
    ".overheid.nl",
    ".int",
];

const AUTHORITY_HOSTS: &[&str] = &[
    "wikipedia.org",
    "who.int",
    "nature.com",
    "sciencedirect.com",
    "ncbi.nlm.nih.gov",
    "gartner.com",
    "forrester.com",
    "statista.com",
    "pewresearch.org",
    "mckinsey.com",
    "hbr.org",
    "reuters.com",
    "developers.google.com",
    "cbs.nl",
];

const DATA_HOSTS: &[&str] = &[
    "statista.com",
    "ourworldindata.org",
    "data.gov",
    "eurostat.ec.europa.eu",
    "census.gov",
    "cbs.nl",
    "pewresearch.org",
    "gartner.com",
    "forrester.com",
    "mckinsey.com",
];

static DATA_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:/research|/report|/study|/studies|/survey|/data|/statistics|\.pdf$|\.csv$)").unwrap()
});

static DATA_ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:study|report|survey|research|data|statistics|onderzoek|rapport|cijfers)\b").unwrap()
});

static FACT_ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\[?\d{1,3}\]?$|\b(?:source|sources|bron|reference|referentie|via)\b").unwrap()
});

enum LinkKind {
    Internal,
    External(Url),
}

pub(crate) fn count_signals(page: &PageView<'_>, counts: &mut SignalCounts) {
    let Some(selector) = dom::selector("a[href]") else {
        return;
    };

    let base = page.context.url.as_ref();
    let (mut internal, mut external, mut authority, mut data, mut facts) = (0, 0, 0, 0, 0);

    for anchor in page.document.select(&selector) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let Some(kind) = classify(href.trim(), base) else {
            continue;
        };
        let text = dom::element_text(&anchor);

        match kind {
            LinkKind::Internal => internal += 1,
            LinkKind::External(url) => {
                external += 1;
                let host = url.host_str().map(strip_www).unwrap_or_default();
                if is_authority(host) {
                    authority += 1;
                }
                if host_matches(host, DATA_HOSTS)
                    || DATA_PATH.is_match(url.path())
                    || DATA_ANCHOR.is_match(&text)
                {
                    data += 1;
                }
                if FACT_ANCHOR.is_match(&text) || in_citation(&anchor) {
                    facts += 1;
                }
            }
        }
    }

    counts.set_usize(Signal::InternalLinks, internal);
    counts.set_usize(Signal::ExternalLinks, external);
    counts.set_usize(Signal::AuthorityLinks, authority);
    counts.set_usize(Signal::DataCitations, data);
    counts.set_usize(Signal::FactSources, facts);
}

/// Internal or external; `None` for fragments and non-web schemes
fn classify(href: &str, base: Option<&Url>) -> Option<LinkKind> {
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let resolved = match base {
        Some(base) => base.join(href).ok()?,
        None => match Url::parse(href) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => return Some(LinkKind::Internal),
            Err(_) => return None,
        },
    };

    if !matches!(resolved.scheme(), "http" | "https") {
        return None;
    }

    let same_site = base
        .and_then(Url::host_str)
        .zip(resolved.host_str())
        .is_some_and(|(a, b)| strip_www(a).eq_ignore_ascii_case(strip_www(b)));

    if same_site {
        Some(LinkKind::Internal)
    } else {
        Some(LinkKind::External(resolved))
    }
}

fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}

fn host_matches(host: &str, list: &[&str]) -> bool {
    list.iter()
        .any(|h| host == *h || host.ends_with(&format!(".{}", h)))
}

fn is_authority(host: &str) -> bool {
    AUTHORITY_SUFFIXES.iter().any(|s| host.ends_with(s)) || host_matches(host, AUTHORITY_HOSTS)
}

fn in_citation(anchor: &ElementRef<'_>) -> bool {
    anchor.ancestors().any(|a| {
        a.value().as_element().is_some_and(|e| {
            matches!(e.name(), "cite" | "sup" | "footer")
                || e.has_class("footnote", CaseSensitivity::AsciiCaseInsensitive)
        })
    })
}

#[cfg(test)]
mod tests {
    use super::super::{parse_content, ParseContext};
    use crate::model::Signal;
    use url::Url;

    const PAGE: &str = r##"<html><body>
        <p><a href="/pricing">Pricing</a> <a href="https://www.example.com/about">About</a>
           <a href="#top">Top</a> <a href="mailto:hi@example.com">Mail</a></p>
        <p>See the <a href="https://www.statista.com/statistics/1234">market size</a>,
           the <a href="https://en.wikipedia.org/wiki/SEO">overview</a>
           and <a href="https://blog.other.net/post">a blog</a>.</p>
        <p>Per the <a href="https://www.cdc.gov/report.pdf">CDC report</a><sup><a href="https://news.site/a">1</a></sup></p>
      </body></html>"##;

    #[test]
    fn test_link_profile_with_base_url() {
        let ctx = ParseContext::new(Url::parse("https://example.com/blog/post").ok(), 2025);
        let counts = parse_content(PAGE, &ctx).counts;

        assert_eq!(counts.get(Signal::InternalLinks), 2);
        assert_eq!(counts.get(Signal::ExternalLinks), 5);
        assert_eq!(counts.get(Signal::AuthorityLinks), 3);
        assert_eq!(counts.get(Signal::DataCitations), 2);
        assert_eq!(counts.get(Signal::FactSources), 1);
    }

    #[test]
    fn test_relative_links_without_base_are_internal() {
        let ctx = ParseContext::new(None, 2025);
        let counts = parse_content(PAGE, &ctx).counts;

        assert_eq!(counts.get(Signal::InternalLinks), 1);
        assert_eq!(counts.get(Signal::ExternalLinks), 6);
    }
}
