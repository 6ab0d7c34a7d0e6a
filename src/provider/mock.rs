//! Mock provider for testing
//!
//! Returns configurable responses without making real API calls.
//! Also backs `--provider mock` so the browser works offline.

use super::{GenerateRequest, GenerateResponse, Provider};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock provider that returns predefined responses
pub struct MockProvider {
    /// Queue of replies to return (FIFO); `Err` simulates a failed call
    replies: Arc<Mutex<VecDeque<std::result::Result<GenerateResponse, String>>>>,
    /// Default response when queue is empty
    default_response: String,
    /// Track all requests made (for assertions)
    requests: Arc<Mutex<Vec<GenerateRequest>>>,
    /// Artificial latency per call
    delay: Option<Duration>,
}

impl MockProvider {
    /// Create a new mock provider that answers every prompt the same way
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            default_response: "Mock response".to_string(),
            requests: Arc::new(Mutex::new(vec![])),
            delay: None,
        }
    }

    /// Set the default response when queue is empty
    pub fn with_default(mut self, response: impl Into<String>) -> Self {
        self.default_response = response.into();
        self
    }

    /// Sleep before answering each call
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Add a text response to the queue
    pub fn queue_response(&self, response: impl Into<String>) {
        self.queue(Ok(GenerateResponse::text(response)));
    }

    /// Add a full response (with grounding) to the queue
    pub fn queue_generated(&self, response: GenerateResponse) {
        self.queue(Ok(response));
    }

    /// Make the next queued call fail with `message`
    pub fn queue_failure(&self, message: impl Into<String>) {
        self.queue(Err(message.into()));
    }

    fn queue(&self, reply: std::result::Result<GenerateResponse, String>) {
        self.replies.lock().unwrap().push_back(reply);
    }

    /// Get all requests made to this provider
    pub fn get_requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Get the last request made
    pub fn last_request(&self) -> Option<GenerateRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn default_model(&self) -> &str {
        "mock-model"
    }

    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        self.requests.lock().unwrap().push(request.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => anyhow::bail!(message),
            None => Ok(GenerateResponse::text(self.default_response.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::GroundingLink;

    #[tokio::test]
    async fn test_mock_default_response() {
        let provider = MockProvider::new();
        let response = provider.generate(GenerateRequest::new("Hello")).await.unwrap();
        assert_eq!(response.text, "Mock response");
    }

    #[tokio::test]
    async fn test_mock_queued_responses() {
        let provider = MockProvider::new();
        provider.queue_response("First");
        provider.queue_response("Second");

        let r1 = provider.generate(GenerateRequest::new("a")).await.unwrap();
        let r2 = provider.generate(GenerateRequest::new("b")).await.unwrap();
        let r3 = provider.generate(GenerateRequest::new("c")).await.unwrap();

        assert_eq!(r1.text, "First");
        assert_eq!(r2.text, "Second");
        assert_eq!(r3.text, "Mock response"); // Default after queue empty
    }

    #[tokio::test]
    async fn test_mock_failure() {
        let provider = MockProvider::new();
        provider.queue_failure("quota exceeded");

        let err = provider.generate(GenerateRequest::new("a")).await.unwrap_err();
        assert_eq!(err.to_string(), "quota exceeded");
    }

    #[tokio::test]
    async fn test_mock_records_requests() {
        let provider = MockProvider::new();
        provider
            .generate(GenerateRequest::new("First").with_web_search())
            .await
            .unwrap();
        provider.generate(GenerateRequest::new("Second")).await.unwrap();

        let requests = provider.get_requests();
        assert_eq!(requests.len(), 2);
        assert!(requests[0].web_search);
        assert_eq!(provider.last_request().unwrap().prompt, "Second");
    }

    #[tokio::test]
    async fn test_mock_grounding_passthrough() {
        let provider = MockProvider::new();
        provider.queue_generated(
            GenerateResponse::text("body")
                .with_grounding(vec![GroundingLink::new("https://a.dev", "A")]),
        );

        let response = provider.generate(GenerateRequest::new("q")).await.unwrap();
        assert_eq!(response.grounding.len(), 1);
    }
}
