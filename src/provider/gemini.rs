//! Gemini provider using the Generative Language REST API
//!
//! Calls `models/{model}:generateContent`. Web-search grounding maps to the
//! `googleSearch` tool and citations come back as grounding chunks.

use super::{GenerateRequest, GenerateResponse, Provider};
use crate::page::GroundingLink;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Gemini API host
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Model used by every call unless overridden
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Point the provider at another host (proxies, test servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }

    fn build_payload(&self, request: &GenerateRequest) -> GenerateContentRequest {
        let system_instruction = request.system_instruction.as_ref().map(|s| Content {
            role: None,
            parts: vec![Part::text(s)],
        });

        let tools = if request.web_search {
            vec![Tool {
                google_search: GoogleSearch {},
            }]
        } else {
            vec![]
        };

        let generation_config = request.thinking_budget.map(|budget| GenerationConfig {
            thinking_config: ThinkingConfig {
                thinking_budget: budget,
            },
        });

        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part::text(&request.prompt)],
            }],
            system_instruction,
            tools,
            generation_config,
        }
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn default_model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        let model = if request.model.is_empty() {
            self.model.as_str()
        } else {
            request.model.as_str()
        };
        let payload = self.build_payload(&request);

        tracing::debug!(
            provider = "gemini",
            model = %model,
            web_search = request.web_search,
            thinking_budget = ?request.thinking_budget,
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .context("Failed to send request to Gemini API")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or(body);
            tracing::error!(
                provider = "gemini",
                status = %status,
                error = %message,
                "Gemini API error"
            );
            anyhow::bail!("Gemini API error ({}): {}", status, message);
        }

        let api_response: GenerateContentResponse = response
            .json()
            .await
            .context("Failed to parse Gemini API response")?;

        let candidate = api_response.candidates.into_iter().next();
        let (text, grounding) = match candidate {
            Some(c) => (
                c.content.map(|content| content.answer_text()).unwrap_or_default(),
                c.grounding_metadata
                    .map(|m| m.links())
                    .unwrap_or_default(),
            ),
            None => (String::new(), Vec::new()),
        };

        let usage = api_response.usage_metadata.unwrap_or_default();
        tracing::debug!(
            provider = "gemini",
            prompt_tokens = usage.prompt_token_count,
            completion_tokens = usage.candidates_token_count,
            sources = grounding.len(),
            "Gemini API response received"
        );

        Ok(GenerateResponse::text(text).with_grounding(grounding))
    }
}

// ============================================================================
// API TYPES
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    /// Concatenated text parts, skipping thought summaries
    fn answer_text(self) -> String {
        self.parts
            .into_iter()
            .filter(|p| !p.thought.unwrap_or(false))
            .filter_map(|p| p.text)
            .collect()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    thought: Option<bool>,
}

impl Part {
    fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            thought: None,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    thinking_config: ThinkingConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

impl GroundingMetadata {
    fn links(self) -> Vec<GroundingLink> {
        self.grounding_chunks
            .into_iter()
            .filter_map(|chunk| chunk.web)
            .filter_map(|web| {
                let uri = web.uri?;
                let title = web.title.unwrap_or_else(|| uri.clone());
                Some(GroundingLink::new(uri, title))
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    web: Option<WebChunk>,
}

#[derive(Debug, Deserialize)]
struct WebChunk {
    uri: Option<String>,
    title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

// ============================================================================
// TESTS
// ============================================================================
