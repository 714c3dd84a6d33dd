//! Deterministic scorer
//!
//! A pure, total function from validated and raw counts to a 0-100 score
//! breakdown. Judged categories use validated counts, every other metric uses
//! the raw parser count. Missing counts read as zero.

use crate::model::{
    FrameworkScore, JudgedCategory, MetricScore, PillarScore, QualityLabel, ScoreBreakdown, Signal,
    SignalCounts, ValidationResult,
};

pub mod tables;

use tables::{FrameworkDef, GRAAF, CRAFT, TECHNICAL, max_points, points};

/// Compute the full score breakdown
pub fn score(validation: &ValidationResult, raw: &SignalCounts) -> ScoreBreakdown {
    let input = |signal: Signal| match judged(signal) {
        Some(category) => validation.validated(category),
        None => raw.get(signal),
    };

    let graaf = score_framework(&GRAAF, &input);
    let craft = score_framework(&CRAFT, &input);
    let technical = score_framework(&TECHNICAL, &input);
    let total = graaf.total + craft.total + technical.total;

    tracing::debug!(
        total = total,
        graaf = graaf.total,
        craft = craft.total,
        technical = technical.total,
        "Computed content score"
    );

    ScoreBreakdown {
        total,
        graaf,
        craft,
        technical,
    }
}

/// Bucket a total score into a quality label
pub fn quality_label(total: u32) -> QualityLabel {
    if total >= 90 {
        QualityLabel::Excellent
    } else if total >= 80 {
        QualityLabel::Good
    } else if total >= 70 {
        QualityLabel::Average
    } else if total >= 60 {
        QualityLabel::BelowAverage
    } else {
        QualityLabel::Poor
    }
}

fn judged(signal: Signal) -> Option<JudgedCategory> {
    JudgedCategory::ALL.into_iter().find(|c| c.signal() == signal)
}

fn score_framework(def: &FrameworkDef, input: &impl Fn(Signal) -> u32) -> FrameworkScore {
    let pillars: Vec<PillarScore> = def
        .pillars
        .iter()
        .map(|pillar| {
            let metrics: Vec<MetricScore> = pillar
                .metrics
                .iter()
                .map(|m| {
                    let value = input(m.signal);
                    MetricScore {
                        metric: m.signal,
                        input: value,
                        points: points(m.table, value),
                        max: max_points(m.table),
                    }
                })
                .collect();
            PillarScore {
                name: pillar.name.to_string(),
                total: metrics.iter().map(|m| m.points).sum(),
                max: metrics.iter().map(|m| m.max).sum(),
                metrics,
            }
        })
        .collect();

    FrameworkScore {
        name: def.name.to_string(),
        total: pillars.iter().map(|p| p.total).sum(),
        max: pillars.iter().map(|p| p.max).sum(),
        pillars,
    }
}
