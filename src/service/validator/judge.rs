//! External judge seam
//!
//! The validator only sees `Judge::judge(request) -> text`; the rig-backed
//! `LlmJudge` is the production implementation and tests use canned stubs.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::completion::Prompt;

use super::error::JudgeError;
use crate::model::ValidatorConfig;
use crate::service::llm::LlmClient;

/// Rubric plus candidates, ready to send
#[derive(Debug, Clone)]
pub struct JudgeRequest {
    pub system: String,
    pub prompt: String,
}

#[async_trait]
pub trait Judge: Send + Sync {
    /// Free-form response text, expected to contain one JSON verdict
    async fn judge(&self, request: &JudgeRequest) -> Result<String, JudgeError>;

    /// Name used in logs
    fn name(&self) -> &str;
}

/// Judge backed by an OpenAI chat model
pub struct LlmJudge {
    llm_client: LlmClient,
    model: String,
    max_tokens: u64,
    timeout: Duration,
}

impl LlmJudge {
    pub fn new(llm_client: LlmClient, config: &ValidatorConfig) -> Self {
        tracing::info!(
            model = %config.model,
            timeout_secs = config.timeout_secs,
            max_tokens = config.max_tokens,
            "LLM judge initialized"
        );
        Self {
            llm_client,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

#[async_trait]
impl Judge for LlmJudge {
    async fn judge(&self, request: &JudgeRequest) -> Result<String, JudgeError> {
        let prompt_length = request.prompt.len();

        tracing::debug!(
            model = %self.model,
            prompt_length = prompt_length,
            "Initiating OpenAI API call for quality validation"
        );

        let agent = self
            .llm_client
            .openai_client()
            .agent(&self.model)
            .preamble(&request.system)
            .temperature(0.0)
            .max_tokens(self.max_tokens)
            .build();

        let start_time = Instant::now();
        let call = agent.prompt(request.prompt.as_str());

        let response = match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                tracing::error!(
                    model = %self.model,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    prompt_length = prompt_length,
                    error = %e,
                    "OpenAI API call for quality validation failed"
                );
                return Err(JudgeError::Request(e.to_string()));
            }
            Err(_) => {
                tracing::warn!(
                    model = %self.model,
                    timeout_secs = self.timeout.as_secs(),
                    prompt_length = prompt_length,
                    "OpenAI API call for quality validation timed out"
                );
                return Err(JudgeError::Timeout(self.timeout));
            }
        };

        tracing::info!(
            model = %self.model,
            elapsed_ms = start_time.elapsed().as_millis(),
            prompt_length = prompt_length,
            response_length = response.len(),
            "OpenAI API call for quality validation completed successfully"
        );

        Ok(response)
    }

    fn name(&self) -> &str {
        &self.model
    }
}

/// Judge used when no API key is configured; every call falls back
pub struct UnavailableJudge {
    reason: String,
}

impl UnavailableJudge {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl Judge for UnavailableJudge {
    async fn judge(&self, _request: &JudgeRequest) -> Result<String, JudgeError> {
        Err(JudgeError::Unavailable(self.reason.clone()))
    }

    fn name(&self) -> &str {
        "unavailable"
    }
}
