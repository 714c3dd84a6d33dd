pub mod cache;
pub mod cache_keys;
pub mod llm;
pub mod parser;
pub mod pipeline;
pub mod scoring;
pub mod validator;

pub use cache::ScanCache;
pub use llm::LlmClient;
pub use parser::{ParseContext, parse_content};
pub use pipeline::{PipelineError, ScanPipeline};
pub use scoring::{quality_label, score};
pub use validator::QualityValidator;
