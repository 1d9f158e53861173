//! Syllabus LLM Provider Layer
//!
//! The AI assistant adapter behind the `LlmProvider` trait from `syllabus-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OllamaProvider`: Local Ollama API integration
//! - `OpenAiProvider`: Any chat-completions compatible endpoint
//!
//! Prompts are assembled by [`prompt::build_prompt`] from a concept's
//! context block and one of the three fixed [`AssistantTask`]s.
//!
//! # Examples
//!
//! ```
//! use syllabus_llm::MockProvider;
//! use syllabus_domain::traits::LlmProvider;
//!
//! let provider = MockProvider::new("Plants make food from light.");
//! let result = provider.generate("test prompt").unwrap();
//! assert_eq!(result, "Plants make food from light.");
//! ```

#![warn(missing_docs)]

pub mod ollama;
pub mod openai;
pub mod prompt;
pub mod provider;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use syllabus_domain::traits::LlmProvider as LlmProviderTrait;
use thiserror::Error;

pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;
pub use prompt::{build_prompt, AssistantTask, ConceptContext};
pub use provider::{AnyProvider, AssistantConfig, ProviderKind};

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The model answered with nothing
    #[error("Empty response from model")]
    EmptyResponse,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// API key environment variable unset or empty
    #[error("API key not set (expected in ${0})")]
    MissingApiKey(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Reject blank completions
pub(crate) fn non_empty(text: String) -> Result<String, LlmError> {
    if text.trim().is_empty() {
        Err(LlmError::EmptyResponse)
    } else {
        Ok(text)
    }
}

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Fail,
}

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls.
///
/// # Examples
///
/// ```
/// use syllabus_llm::MockProvider;
/// use syllabus_domain::traits::LlmProvider;
///
/// let provider = MockProvider::default();
/// provider.add_response("prompt1", "response1");
/// assert_eq!(provider.generate("prompt1").unwrap(), "response1");
/// assert_eq!(provider.call_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, MockReply>>>,
    call_count: Arc<Mutex<usize>>,
    last_prompt: Arc<Mutex<Option<String>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
            last_prompt: Arc::new(Mutex::new(None)),
        }
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&self, prompt: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(prompt.into(), MockReply::Text(response.into()));
    }

    /// Configure to return an error for a specific prompt
    pub fn add_error(&self, prompt: impl Into<String>) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(prompt.into(), MockReply::Fail);
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The most recent prompt, if any
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        *self.call_count.lock().unwrap_or_else(PoisonError::into_inner) += 1;
        *self.last_prompt.lock().unwrap_or_else(PoisonError::into_inner) = Some(prompt.to_string());

        let responses = self.responses.lock().unwrap_or_else(PoisonError::into_inner);
        match responses.get(prompt) {
            Some(MockReply::Fail) => Err(LlmError::Other("Mock error".to_string())),
            Some(MockReply::Text(text)) => non_empty(text.clone()),
            None => non_empty(self.default_response.clone()),
        }
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}
