use serde::Deserialize;
use std::fs;
use std::path::Path;
use url::Url;

const ENV_CONFIG_PATH: &str = "CONTENTSCORE_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

const ENV_VALIDATOR_MODEL: &str = "VALIDATOR_MODEL";
const ENV_VALIDATOR_TIMEOUT_SECS: &str = "VALIDATOR_TIMEOUT_SECS";
const ENV_FETCH_TIMEOUT_MS: &str = "FETCH_TIMEOUT_MS";

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Host filtering for scanned URLs
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UrlPolicy {
    /// Allowed domains (whitelist). If empty, all domains are allowed.
    #[serde(default)]
    pub allow: Vec<String>,
    /// Denied domains (blacklist). Applied after allow list.
    #[serde(default)]
    pub deny: Vec<String>,
}

impl UrlPolicy {
    /// Check if a URL is allowed based on the allow/deny lists
    pub fn is_url_allowed(&self, url: &Url) -> bool {
        let host = match url.host_str() {
            Some(h) => h.to_lowercase(),
            None => return false,
        };

        if self.deny.iter().any(|d| host_matches(&host, d)) {
            return false;
        }

        if self.allow.is_empty() {
            return true;
        }

        self.allow.iter().any(|a| host_matches(&host, a))
    }
}

/// `host` is `domain` itself or one of its subdomains
fn host_matches(host: &str, domain: &str) -> bool {
    let domain = domain.trim().trim_start_matches('.').to_lowercase();
    !domain.is_empty() && (host == domain || host.ends_with(&format!(".{}", domain)))
}

/// When the fetcher considers navigation finished
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitCondition {
    Load,
    DomContentLoaded,
    #[default]
    NetworkIdle,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    pub timeout_ms: u64,
    pub wait_condition: WaitCondition,
    pub post_load_delay_ms: u64,
    pub max_concurrent_pages: usize,
    /// Responses larger than this are rejected
    pub max_body_bytes: usize,
    pub user_agent: String,
    #[serde(flatten)]
    pub policy: UrlPolicy,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            wait_condition: WaitCondition::NetworkIdle,
            post_load_delay_ms: 2_000,
            max_concurrent_pages: 5,
            max_body_bytes: 10 * 1024 * 1024,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            policy: UrlPolicy::default(),
        }
    }
}

/// What to do when the judge answers with something unparseable
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedPolicy {
    /// Substitute raw parser counts and keep scanning
    #[default]
    Fallback,
    /// Surface the failure to the caller
    Strict,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    pub model: String,
    pub timeout_secs: u64,
    pub max_tokens: u64,
    /// Maximum snippets per category shown to the judge
    pub snippet_cap: usize,
    pub malformed_policy: MalformedPolicy,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            timeout_secs: 30,
            max_tokens: 2_000,
            snippet_cap: 15,
            malformed_policy: MalformedPolicy::Fallback,
        }
    }
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub validator: ValidatorConfig,
}

/// Application configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub fetcher: FetcherConfig,
    pub validator: ValidatorConfig,
}

impl Config {
    /// Load configuration from config file, then apply environment overrides
    pub fn from_env() -> Self {
        let config_path = std::env::var(ENV_CONFIG_PATH)
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let file = Self::load_config_file(&config_path).unwrap_or_default();

        let mut config = Self {
            fetcher: file.fetcher,
            validator: file.validator,
        };

        if let Ok(model) = std::env::var(ENV_VALIDATOR_MODEL)
            && !model.trim().is_empty()
        {
            config.validator.model = model;
        }

        if let Some(secs) = env_number(ENV_VALIDATOR_TIMEOUT_SECS) {
            config.validator.timeout_secs = secs;
        }

        if let Some(ms) = env_number(ENV_FETCH_TIMEOUT_MS) {
            config.fetcher.timeout_ms = ms;
        }

        config
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => Self::parse_config(&contents).inspect(|_| {
                tracing::info!(path = %path.display(), "Loaded configuration from file");
            }),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                None
            }
        }
    }

    fn parse_config(contents: &str) -> Option<ConfigFile> {
        let contents = contents.trim();
        if contents.is_empty() {
            tracing::debug!("Config file is empty, using defaults");
            return Some(ConfigFile::default());
        }

        match serde_yaml::from_str(contents) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to parse config file, using defaults");
                None
            }
        }
    }
}

fn env_number(name: &str) -> Option<u64> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
