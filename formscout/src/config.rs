use serde::Deserialize;
use std::env;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub store: StoreConfig,
    pub sampling: SamplingConfig,
    pub llm: Option<LlmConfig>,
}

/// Collaborator endpoints for the external document store.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub base_url: String,
    pub connection_string: String,
    pub database: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SamplingConfig {
    /// Documents fetched from the primary collection per sample.
    pub sample_limit: usize,
    /// Documents fetched from each relationship target collection.
    pub target_sample_limit: usize,
    /// Preview values collected per detected relationship.
    pub preview_limit: usize,
    /// Character cap for a single preview value.
    pub preview_max_chars: usize,
}

/// LLM configuration for the form-generation service.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            sample_limit: 10,
            target_sample_limit: 5,
            preview_limit: 3,
            preview_max_chars: 50,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig {
                base_url: env::var("FORMSCOUT_STORE_URL")
                    .unwrap_or_else(|_| "http://localhost:3000".to_string()),
                connection_string: env::var("FORMSCOUT_CONNECTION_STRING")
                    .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
                database: env::var("FORMSCOUT_DATABASE").unwrap_or_else(|_| "test".to_string()),
                timeout_secs: parse_env_or("FORMSCOUT_STORE_TIMEOUT", 30),
            },
            sampling: SamplingConfig {
                sample_limit: parse_env_or("SAMPLE_LIMIT", 10),
                target_sample_limit: parse_env_or("TARGET_SAMPLE_LIMIT", 5),
                preview_limit: parse_env_or("PREVIEW_LIMIT", 3),
                preview_max_chars: parse_env_or("PREVIEW_MAX_CHARS", 50),
            },
            llm: env::var("LLM_MODEL").ok().map(|model| LlmConfig {
                model,
                api_key: env::var("LLM_API_KEY").ok(),
                base_url: env::var("LLM_BASE_URL").ok(),
                timeout_secs: parse_env_or("LLM_TIMEOUT", 30),
                max_retries: parse_env_or("LLM_MAX_RETRIES", 3),
            }),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}

/// Known LLM providers that use OpenAI-compatible APIs
pub const KNOWN_LLM_PROVIDERS: &[&str] = &["openai", "openrouter", "ollama", "lmstudio"];

/// Parse an LLM model name into (provider, model) tuple.
pub fn parse_llm_provider_model(model: &str) -> (&str, &str) {
    if let Some((prefix, rest)) = model.split_once('/') {
        let prefix_lower = prefix.to_lowercase();
        if KNOWN_LLM_PROVIDERS.contains(&prefix_lower.as_str()) {
            return (prefix, rest);
        }
    }
    // Default to treating the whole string as a local model
    ("local", model)
}
