//! OpenAI-compatible chat-completions provider

use crate::ollama::{backoff, http_client, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS};
use crate::{non_empty, LlmError};
use serde::{Deserialize, Serialize};
use std::thread;
use std::time::Duration;
use syllabus_domain::traits::LlmProvider as LlmProviderTrait;
use tracing::{debug, warn};

/// Default API base URL
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

/// Default environment variable holding the API key
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Provider for `/chat/completions` endpoints
pub struct OpenAiProvider {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::blocking::Client,
    max_retries: u32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiProvider {
    /// Create a provider with an explicit API key
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
            client: http_client(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Create a provider reading the API key from `env_var`
    ///
    /// # Errors
    /// `MissingApiKey` if the variable is unset or blank.
    pub fn from_env(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        env_var: &str,
    ) -> Result<Self, LlmError> {
        let key = std::env::var(env_var)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| LlmError::MissingApiKey(env_var.to_string()))?;
        Ok(Self::new(endpoint, model, key))
    }

    /// Set the maximum number of attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = http_client(timeout);
        self
    }

    fn parse(response: reqwest::blocking::Response) -> Result<String, LlmError> {
        let parsed: ChatResponse = response
            .json()
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(LlmError::EmptyResponse)?;
        non_empty(content)
    }
}

impl LlmProviderTrait for OpenAiProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        let url = format!("{}/chat/completions", self.endpoint);
        let body = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };
        debug!("Chat completion: model={} prompt_len={}", self.model, prompt.len());

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            let sent = self
                .client
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(&body)
                .send();

            match sent {
                Ok(response) if response.status().is_success() => return Self::parse(response),
                Ok(response) if response.status() == reqwest::StatusCode::NOT_FOUND => {
                    return Err(LlmError::ModelNotAvailable(self.model.clone()));
                }
                Ok(response) if response.status().is_client_error()
                    && response.status() != reqwest::StatusCode::TOO_MANY_REQUESTS =>
                {
                    let status = response.status();
                    let text = response.text().unwrap_or_default();
                    return Err(LlmError::Communication(format!("HTTP {}: {}", status, text)));
                }
                Ok(response) => {
                    let status = response.status();
                    let text = response.text().unwrap_or_default();
                    last_error = Some(LlmError::Communication(format!("HTTP {}: {}", status, text)));
                }
                Err(e) => {
                    last_error = Some(LlmError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                let delay = backoff(attempts);
                warn!("Chat completion failed (attempt {}), retrying in {:?}", attempts, delay);
                thread::sleep(delay);
            }
        }

        Err(last_error
            .unwrap_or_else(|| LlmError::Communication("Max retries exceeded".to_string())))
    }

    fn describe(&self) -> String {
        format!("openai:{} @ {}", self.model, self.endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key() {
        let result = OpenAiProvider::from_env(
            DEFAULT_ENDPOINT,
            "gpt-4o-mini",
            "SYLLABUS_TEST_KEY_THAT_IS_NEVER_SET",
        );
        match result {
            Err(LlmError::MissingApiKey(var)) => {
                assert_eq!(var, "SYLLABUS_TEST_KEY_THAT_IS_NEVER_SET")
            }
            _ => panic!("Expected MissingApiKey"),
        }
    }

    #[test]
    fn test_request_shape() {
        let body = ChatRequest {
            model: "m",
            messages: [ChatMessage {
                role: "user",
                content: "hi",
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"model": "m", "messages": [{"role": "user", "content": "hi"}]})
        );
    }

    #[test]
    fn test_unreachable_endpoint() {
        let provider =
            OpenAiProvider::new("http://localhost:99999/v1", "gpt-4o-mini", "k").with_max_retries(1);
        assert!(matches!(
            provider.generate("test"),
            Err(LlmError::Communication(_))
        ));
    }

    #[test]
    #[ignore] // Requires network access and OPENAI_API_KEY
    fn test_openai_generate_integration() {
        let provider =
            OpenAiProvider::from_env(DEFAULT_ENDPOINT, "gpt-4o-mini", DEFAULT_API_KEY_ENV).unwrap();
        let response = provider.generate("Say 'hello' and nothing else").unwrap();
        assert!(!response.is_empty());
    }
}
