use std::fmt;

use serde::{Deserialize, Serialize};

use super::signals::Signal;

/// Scorer output: total → frameworks → pillars → metric leaves
///
/// Every total is the sum of its children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub total: u32,
    pub graaf: FrameworkScore,
    pub craft: FrameworkScore,
    pub technical: FrameworkScore,
}

impl ScoreBreakdown {
    pub fn frameworks(&self) -> [&FrameworkScore; 3] {
        [&self.graaf, &self.craft, &self.technical]
    }

    /// Find a leaf by pillar and metric
    pub fn metric(&self, pillar: &str, signal: Signal) -> Option<&MetricScore> {
        self.frameworks()
            .into_iter()
            .flat_map(|f| f.pillars.iter())
            .find(|p| p.name == pillar)
            .and_then(|p| p.metrics.iter().find(|m| m.metric == signal))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameworkScore {
    pub name: String,
    pub total: u32,
    pub max: u32,
    pub pillars: Vec<PillarScore>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PillarScore {
    pub name: String,
    pub total: u32,
    pub max: u32,
    pub metrics: Vec<MetricScore>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricScore {
    pub metric: Signal,
    pub input: u32,
    pub points: u32,
    pub max: u32,
}

/// Coarse bucket derived from the final score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QualityLabel {
    Excellent,
    Good,
    Average,
    BelowAverage,
    Poor,
}

impl QualityLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityLabel::Excellent => "excellent",
            QualityLabel::Good => "good",
            QualityLabel::Average => "average",
            QualityLabel::BelowAverage => "below-average",
            QualityLabel::Poor => "poor",
        }
    }
}

impl fmt::Display for QualityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
