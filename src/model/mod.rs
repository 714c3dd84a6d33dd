pub mod config;
pub mod extraction;
pub mod page;
pub mod scan;
pub mod score;
pub mod signals;
pub mod validation;
pub mod verdict;

pub use config::{Config, FetcherConfig, MalformedPolicy, UrlPolicy, ValidatorConfig, WaitCondition};
pub use extraction::{PageMetadata, RawExtraction, Snippet};
pub use page::{FetchMetadata, FetchedPage};
pub use scan::{ScanResult, ValidationSummary};
pub use score::{FrameworkScore, MetricScore, PillarScore, QualityLabel, ScoreBreakdown};
pub use signals::{JudgedCategory, Signal, SignalCounts};
pub use validation::{Rejection, ValidationResult};
pub use verdict::{CategoryVerdict, JudgeVerdict, RejectionVerdict};
