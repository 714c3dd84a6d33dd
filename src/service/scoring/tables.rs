//! Score tables
//!
//! Each metric maps one count to points through an ordered `(threshold, points)`
//! table, evaluated top-down: the first row with `count >= threshold` wins and
//! no matching row means zero points. Framework maxima are 50, 30 and 20.

use crate::model::Signal;

/// Ordered `(threshold, points)` rows, highest threshold first
pub type StepTable = &'static [(u32, u32)];

pub struct MetricDef {
    pub signal: Signal,
    pub table: StepTable,
}

pub struct PillarDef {
    pub name: &'static str,
    pub metrics: &'static [MetricDef],
}

pub struct FrameworkDef {
    pub name: &'static str,
    pub pillars: &'static [PillarDef],
}

const fn metric(signal: Signal, table: StepTable) -> MetricDef {
    MetricDef { signal, table }
}

/// Points for `count`, zero when no threshold is reached
pub fn points(table: StepTable, count: u32) -> u32 {
    table
        .iter()
        .find(|(threshold, _)| count >= *threshold)
        .map(|(_, points)| *points)
        .unwrap_or(0)
}

pub fn max_points(table: StepTable) -> u32 {
    table.iter().map(|(_, points)| *points).max().unwrap_or(0)
}

pub const GRAAF: FrameworkDef = FrameworkDef {
    name: "GRAAF",
    pillars: &[
        PillarDef {
            name: "credibility",
            metrics: &[
                metric(Signal::ExpertQuotes, &[(3, 4), (2, 3), (1, 2)]),
                metric(Signal::Statistics, &[(10, 3), (5, 2), (1, 1)]),
                metric(Signal::SourceCitations, &[(5, 3), (3, 2), (1, 1)]),
            ],
        },
        PillarDef {
            name: "relevance",
            metrics: &[
                metric(Signal::KeywordInTitle, &[(1, 3)]),
                metric(Signal::KeywordInIntro, &[(1, 3)]),
                metric(Signal::KeywordMentions, &[(8, 3), (4, 2), (2, 1)]),
                metric(Signal::LsiKeywords, &[(8, 1)]),
            ],
        },
        PillarDef {
            name: "actionability",
            metrics: &[
                metric(Signal::StepByStep, &[(5, 3), (3, 2), (1, 1)]),
                metric(Signal::Examples, &[(3, 3), (2, 2), (1, 1)]),
                metric(Signal::Ctas, &[(3, 3), (2, 2), (1, 1)]),
                metric(Signal::ToolsResources, &[(1, 1)]),
            ],
        },
        PillarDef {
            name: "accuracy",
            metrics: &[
                metric(Signal::DataCitations, &[(5, 3), (3, 2), (1, 1)]),
                metric(Signal::CaseStudies, &[(2, 3), (1, 2)]),
                metric(Signal::FactSources, &[(3, 2), (1, 1)]),
                metric(Signal::PublicationDate, &[(1, 2)]),
            ],
        },
        PillarDef {
            name: "freshness",
            metrics: &[
                metric(Signal::LastModified, &[(1, 3)]),
                metric(Signal::CurrentYearMentions, &[(3, 3), (2, 2), (1, 1)]),
                metric(Signal::DataRecency, &[(3, 3), (2, 2), (1, 1)]),
                metric(Signal::TrendingTopics, &[(1, 1)]),
            ],
        },
    ],
};

pub const CRAFT: FrameworkDef = FrameworkDef {
    name: "CRAFT",
    pillars: &[
        PillarDef {
            name: "cutFluff",
            metrics: &[
                metric(Signal::ReadabilityScore, &[(60, 3), (50, 2), (40, 1)]),
                metric(Signal::ShortSentences, &[(20, 2), (5, 1)]),
                metric(Signal::ShortParagraphs, &[(10, 2), (3, 1)]),
            ],
        },
        PillarDef {
            name: "reviewOptimize",
            metrics: &[
                metric(Signal::KeywordInHeadings, &[(2, 3), (1, 2)]),
                metric(Signal::LsiKeywords, &[(15, 3), (8, 2), (4, 1)]),
                metric(Signal::ExternalLinks, &[(5, 2), (2, 1)]),
            ],
        },
        PillarDef {
            name: "addVisuals",
            metrics: &[
                metric(Signal::ImagesWithAlt, &[(3, 2), (1, 1)]),
                metric(Signal::Videos, &[(1, 1)]),
                metric(Signal::Tables, &[(2, 2), (1, 1)]),
                metric(Signal::ComparisonTables, &[(1, 1)]),
            ],
        },
        PillarDef {
            name: "faqIntegration",
            metrics: &[
                metric(Signal::FaqCount, &[(8, 3), (5, 2), (3, 1)]),
                metric(Signal::FaqSchema, &[(1, 1)]),
                metric(Signal::FaqHeading, &[(1, 1)]),
            ],
        },
        PillarDef {
            name: "trustBuilding",
            metrics: &[
                metric(Signal::AuthorBio, &[(1, 1)]),
                metric(Signal::Credentials, &[(1, 1)]),
                metric(Signal::Testimonials, &[(1, 1)]),
                metric(Signal::AuthorityLinks, &[(3, 1)]),
            ],
        },
    ],
};

pub const TECHNICAL: FrameworkDef = FrameworkDef {
    name: "Technical SEO",
    pillars: &[
        PillarDef {
            name: "metadata",
            metrics: &[
                metric(Signal::MetaTitleLength, &[(50, 3), (40, 2), (30, 1)]),
                metric(Signal::MetaDescLength, &[(140, 3), (120, 2), (100, 1)]),
            ],
        },
        PillarDef {
            name: "structure",
            metrics: &[
                metric(Signal::HeadingHierarchy, &[(1, 3)]),
                metric(Signal::TableOfContents, &[(1, 2)]),
                metric(Signal::InternalLinks, &[(30, 4), (20, 3), (10, 2), (5, 1)]),
            ],
        },
        PillarDef {
            name: "markup",
            metrics: &[
                metric(Signal::SchemaTypes, &[(3, 4), (2, 3), (1, 2)]),
                metric(Signal::MobileResponsive, &[(1, 1)]),
            ],
        },
    ],
};

pub const FRAMEWORKS: [&FrameworkDef; 3] = [&GRAAF, &CRAFT, &TECHNICAL];
