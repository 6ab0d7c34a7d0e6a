//! # Provider Abstraction Layer
//!
//! Trait and implementations for the text-generation service that produces
//! every page Brow shows.
//!
//! - [`Provider`] - Core trait for generating text
//! - [`GeminiProvider`] - Production provider using the Gemini REST API
//! - [`MockProvider`] - Test provider with configurable responses
//!
//! ## Creating Providers
//!
//! Use [`create_provider`] to instantiate a provider by name:
//!
//! ```rust
//! use brow::config::BrowConfig;
//! use brow::provider::create_provider;
//!
//! let config = BrowConfig::default();
//! let mock = create_provider("mock", &config);
//! assert!(mock.is_ok());
//!
//! let unknown = create_provider("invalid", &config);
//! assert!(unknown.is_err());
//! ```

mod gemini;
mod mock;

pub use gemini::{GeminiProvider, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use mock::MockProvider;

use anyhow::Result;
use async_trait::async_trait;

use crate::config::BrowConfig;
use crate::error::BrowError;
use crate::page::GroundingLink;

// ============================================================================
// PROVIDER TRAIT (ASYNC)
// ============================================================================

/// Core trait that all text-generation backends implement
///
/// One call is one request; providers never retry.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Returns the provider name (e.g., "gemini", "mock")
    fn name(&self) -> &str;

    /// Model used when a request leaves `model` empty
    fn default_model(&self) -> &str;

    /// Generate text for a prompt
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse>;
}

// ============================================================================
// REQUEST/RESPONSE TYPES
// ============================================================================

/// Request to generate text
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    /// The prompt sent as the user turn
    pub prompt: String,

    /// Optional system instruction
    pub system_instruction: Option<String>,

    /// Model to use; empty means the provider default
    pub model: String,

    /// Ground the answer with web search
    pub web_search: bool,

    /// Thinking budget in tokens (0 disables thinking)
    pub thinking_budget: Option<u32>,
}

impl GenerateRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_instruction: None,
            model: String::new(),
            web_search: false,
            thinking_budget: None,
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_web_search(mut self) -> Self {
        self.web_search = true;
        self
    }

    pub fn with_thinking_budget(mut self, budget: u32) -> Self {
        self.thinking_budget = Some(budget);
        self
    }
}

/// Generated text plus the sources it was grounded on
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateResponse {
    pub text: String,
    pub grounding: Vec<GroundingLink>,
}

impl GenerateResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_grounding(mut self, links: Vec<GroundingLink>) -> Self {
        self.grounding = links;
        self
    }
}

// ============================================================================
// PROVIDER FACTORY
// ============================================================================

/// Create a provider instance by name
///
/// | Name | Description | Requires |
/// |------|-------------|----------|
/// | `gemini` | Gemini REST API | `GEMINI_API_KEY` or `api_key` in config |
/// | `mock` | Testing / offline demo | Nothing |
pub fn create_provider(name: &str, config: &BrowConfig) -> crate::error::Result<Box<dyn Provider>> {
    match name.to_lowercase().as_str() {
        "gemini" => {
            let key = config.api_key().ok_or_else(|| BrowError::MissingApiKey {
                provider: "gemini".to_string(),
            })?;
            let provider = GeminiProvider::new(key)
                .with_base_url(config.base_url())
                .with_model(config.model());
            Ok(Box::new(provider))
        }
        "mock" => Ok(Box::new(MockProvider::new())),
        _ => Err(BrowError::UnknownProvider {
            name: name.to_string(),
        }),
    }
}

// ============================================================================
// TESTS
// ============================================================================
