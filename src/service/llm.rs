//! Shared LLM client
//!
//! Thin wrapper over the rig OpenAI provider so the judge does not depend on
//! how the client is constructed.

use rig::providers::openai;

const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LlmError {
    #[error("{ENV_OPENAI_API_KEY} is not set")]
    MissingApiKey,

    #[error("Failed to create OpenAI client: {0}")]
    Client(String),
}

#[derive(Clone)]
pub struct LlmClient {
    client: openai::Client,
}

impl LlmClient {
    /// Create a client with the provided API key
    pub fn new(api_key: &str) -> Result<Self, LlmError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(LlmError::MissingApiKey);
        }

        let client =
            openai::Client::builder(api_key).build().map_err(|e| LlmError::Client(e.to_string()))?;

        Ok(Self { client })
    }

    /// Create a client from `OPENAI_API_KEY`
    pub fn from_env() -> Result<Self, LlmError> {
        let api_key = std::env::var(ENV_OPENAI_API_KEY).map_err(|_| LlmError::MissingApiKey)?;
        Self::new(&api_key)
    }

    pub fn openai_client(&self) -> &openai::Client {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_api_key_is_rejected() {
        assert!(matches!(LlmClient::new(""), Err(LlmError::MissingApiKey)));
        assert!(matches!(LlmClient::new("   "), Err(LlmError::MissingApiKey)));
    }

    #[test]
    fn test_missing_api_key_message_names_the_variable() {
        assert_eq!(LlmError::MissingApiKey.to_string(), "OPENAI_API_KEY is not set");
    }
}
