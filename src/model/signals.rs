//! Signal catalogue
//!
//! Every SEO signal the parser counts, and the subset routed through the
//! quality judge.

use std::collections::BTreeMap;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A countable SEO content signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Signal {
    // Judged
    ExpertQuotes,
    Statistics,
    CaseStudies,
    FaqCount,
    // Citations and linking
    SourceCitations,
    DataCitations,
    FactSources,
    AuthorityLinks,
    InternalLinks,
    ExternalLinks,
    // Relevance
    KeywordInTitle,
    KeywordInIntro,
    KeywordMentions,
    KeywordInHeadings,
    LsiKeywords,
    // Actionability
    StepByStep,
    Examples,
    Ctas,
    ToolsResources,
    // Freshness
    PublicationDate,
    LastModified,
    CurrentYearMentions,
    DataRecency,
    TrendingTopics,
    // Readability
    ReadabilityScore,
    ShortSentences,
    ShortParagraphs,
    // Metadata
    MetaTitleLength,
    MetaDescLength,
    // Visuals
    ImagesWithAlt,
    Videos,
    Tables,
    ComparisonTables,
    // FAQ structure
    FaqSchema,
    FaqHeading,
    // Trust
    AuthorBio,
    Credentials,
    Testimonials,
    // Technical
    SchemaTypes,
    HeadingHierarchy,
    TableOfContents,
    MobileResponsive,
    // Informational only
    WordCount,
}

impl Signal {
    /// All signals, in catalogue order
    pub const ALL: [Signal; 43] = [
        Signal::ExpertQuotes,
        Signal::Statistics,
        Signal::CaseStudies,
        Signal::FaqCount,
        Signal::SourceCitations,
        Signal::DataCitations,
        Signal::FactSources,
        Signal::AuthorityLinks,
        Signal::InternalLinks,
        Signal::ExternalLinks,
        Signal::KeywordInTitle,
        Signal::KeywordInIntro,
        Signal::KeywordMentions,
        Signal::KeywordInHeadings,
        Signal::LsiKeywords,
        Signal::StepByStep,
        Signal::Examples,
        Signal::Ctas,
        Signal::ToolsResources,
        Signal::PublicationDate,
        Signal::LastModified,
        Signal::CurrentYearMentions,
        Signal::DataRecency,
        Signal::TrendingTopics,
        Signal::ReadabilityScore,
        Signal::ShortSentences,
        Signal::ShortParagraphs,
        Signal::MetaTitleLength,
        Signal::MetaDescLength,
        Signal::ImagesWithAlt,
        Signal::Videos,
        Signal::Tables,
        Signal::ComparisonTables,
        Signal::FaqSchema,
        Signal::FaqHeading,
        Signal::AuthorBio,
        Signal::Credentials,
        Signal::Testimonials,
        Signal::SchemaTypes,
        Signal::HeadingHierarchy,
        Signal::TableOfContents,
        Signal::MobileResponsive,
        Signal::WordCount,
    ];

    /// Wire name of the signal (camelCase)
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::ExpertQuotes => "expertQuotes",
            Signal::Statistics => "statistics",
            Signal::CaseStudies => "caseStudies",
            Signal::FaqCount => "faqCount",
            Signal::SourceCitations => "sourceCitations",
            Signal::DataCitations => "dataCitations",
            Signal::FactSources => "factSources",
            Signal::AuthorityLinks => "authorityLinks",
            Signal::InternalLinks => "internalLinks",
            Signal::ExternalLinks => "externalLinks",
            Signal::KeywordInTitle => "keywordInTitle",
            Signal::KeywordInIntro => "keywordInIntro",
            Signal::KeywordMentions => "keywordMentions",
            Signal::KeywordInHeadings => "keywordInHeadings",
            Signal::LsiKeywords => "lsiKeywords",
            Signal::StepByStep => "stepByStep",
            Signal::Examples => "examples",
            Signal::Ctas => "ctas",
            Signal::ToolsResources => "toolsResources",
            Signal::PublicationDate => "publicationDate",
            Signal::LastModified => "lastModified",
            Signal::CurrentYearMentions => "currentYearMentions",
            Signal::DataRecency => "dataRecency",
            Signal::TrendingTopics => "trendingTopics",
            Signal::ReadabilityScore => "readabilityScore",
            Signal::ShortSentences => "shortSentences",
            Signal::ShortParagraphs => "shortParagraphs",
            Signal::MetaTitleLength => "metaTitleLength",
            Signal::MetaDescLength => "metaDescLength",
            Signal::ImagesWithAlt => "imagesWithAlt",
            Signal::Videos => "videos",
            Signal::Tables => "tables",
            Signal::ComparisonTables => "comparisonTables",
            Signal::FaqSchema => "faqSchema",
            Signal::FaqHeading => "faqHeading",
            Signal::AuthorBio => "authorBio",
            Signal::Credentials => "credentials",
            Signal::Testimonials => "testimonials",
            Signal::SchemaTypes => "schemaTypes",
            Signal::HeadingHierarchy => "headingHierarchy",
            Signal::TableOfContents => "tableOfContents",
            Signal::MobileResponsive => "mobileResponsive",
            Signal::WordCount => "wordCount",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Categories whose raw counts are checked by the quality judge
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub enum JudgedCategory {
    ExpertQuotes,
    Statistics,
    CaseStudies,
    FaqCount,
}

impl JudgedCategory {
    pub const ALL: [JudgedCategory; 4] = [
        JudgedCategory::ExpertQuotes,
        JudgedCategory::Statistics,
        JudgedCategory::CaseStudies,
        JudgedCategory::FaqCount,
    ];

    /// The signal this category validates
    pub fn signal(&self) -> Signal {
        match self {
            JudgedCategory::ExpertQuotes => Signal::ExpertQuotes,
            JudgedCategory::Statistics => Signal::Statistics,
            JudgedCategory::CaseStudies => Signal::CaseStudies,
            JudgedCategory::FaqCount => Signal::FaqCount,
        }
    }

    /// Human-readable label used in judge prompts
    pub fn label(&self) -> &'static str {
        match self {
            JudgedCategory::ExpertQuotes => "Expert Quotes",
            JudgedCategory::Statistics => "Statistics",
            JudgedCategory::CaseStudies => "Case Studies",
            JudgedCategory::FaqCount => "FAQ Entries",
        }
    }
}

impl fmt::Display for JudgedCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.signal().as_str())
    }
}

/// Signal counts keyed by signal
///
/// Absent keys read as zero, so consumers never have to handle a missing count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignalCounts(BTreeMap<Signal, u32>);

impl SignalCounts {
    /// Counts with every catalogued signal present and set to zero
    pub fn zeroed() -> Self {
        Self(Signal::ALL.iter().map(|s| (*s, 0)).collect())
    }

    pub fn get(&self, signal: Signal) -> u32 {
        self.0.get(&signal).copied().unwrap_or(0)
    }

    pub fn set(&mut self, signal: Signal, value: u32) {
        self.0.insert(signal, value);
    }

    /// Set a count from a `usize`, saturating at `u32::MAX`
    pub fn set_usize(&mut self, signal: Signal, value: usize) {
        self.set(signal, u32::try_from(value).unwrap_or(u32::MAX));
    }

    pub fn iter(&self) -> impl Iterator<Item = (Signal, u32)> + '_ {
        self.0.iter().map(|(s, v)| (*s, *v))
    }

    /// Fill in zero for any catalogued signal that is missing
    pub fn normalized(mut self) -> Self {
        for signal in Signal::ALL {
            self.0.entry(signal).or_insert(0);
        }
        self
    }
}

impl Default for SignalCounts {
    fn default() -> Self {
        Self::zeroed()
    }
}
