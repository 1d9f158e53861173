//! Provider selection from configuration

use crate::ollama::{DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS};
use crate::openai::DEFAULT_API_KEY_ENV;
use crate::{LlmError, MockProvider, OllamaProvider, OpenAiProvider};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use syllabus_domain::traits::LlmProvider as LlmProviderTrait;
use tracing::info;

/// Which backend answers assistant requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Canned responses, no network
    Mock,
    /// Local Ollama server
    Ollama,
    /// Chat-completions compatible API
    Openai,
}

/// The `[assistant]` configuration table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Backend
    #[serde(default = "default_provider")]
    pub provider: ProviderKind,

    /// Base URL; the backend default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Environment variable holding the API key (openai only)
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Attempts per request
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            endpoint: None,
            model: default_model(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

fn default_provider() -> ProviderKind {
    ProviderKind::Mock
}

fn default_model() -> String {
    "llama3".to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

/// A provider chosen at runtime
pub enum AnyProvider {
    /// Mock backend
    Mock(MockProvider),
    /// Ollama backend
    Ollama(OllamaProvider),
    /// Chat-completions backend
    OpenAi(OpenAiProvider),
}

impl AnyProvider {
    /// Build the provider described by `config`
    ///
    /// # Errors
    /// `MissingApiKey` when the openai backend has no key in its environment variable.
    pub fn from_config(config: &AssistantConfig) -> Result<Self, LlmError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let provider = match config.provider {
            ProviderKind::Mock => AnyProvider::Mock(MockProvider::new(
                "The assistant is running in mock mode. Configure [assistant] to use a real model.",
            )),
            ProviderKind::Ollama => AnyProvider::Ollama(
                OllamaProvider::new(
                    config
                        .endpoint
                        .as_deref()
                        .unwrap_or(crate::ollama::DEFAULT_ENDPOINT),
                    config.model.as_str(),
                )
                .with_timeout(timeout)
                .with_max_retries(config.max_retries),
            ),
            ProviderKind::Openai => AnyProvider::OpenAi(
                OpenAiProvider::from_env(
                    config
                        .endpoint
                        .as_deref()
                        .unwrap_or(crate::openai::DEFAULT_ENDPOINT),
                    config.model.as_str(),
                    &config.api_key_env,
                )?
                .with_timeout(timeout)
                .with_max_retries(config.max_retries),
            ),
        };
        info!("Assistant provider: {}", provider.describe());
        Ok(provider)
    }
}

impl LlmProviderTrait for AnyProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        match self {
            AnyProvider::Mock(p) => p.generate(prompt),
            AnyProvider::Ollama(p) => p.generate(prompt),
            AnyProvider::OpenAi(p) => p.generate(prompt),
        }
    }

    fn describe(&self) -> String {
        match self {
            AnyProvider::Mock(p) => p.describe(),
            AnyProvider::Ollama(p) => p.describe(),
            AnyProvider::OpenAi(p) => p.describe(),
        }
    }
}
