//! Generative services - the prompts behind every page
//!
//! Each function issues exactly one provider call. Page-producing calls
//! return `Err` on failure; auxiliary calls (suggestions, summaries,
//! copilot) fall back to a fixed message instead.

use anyhow::Result;
use tracing::{instrument, warn};

use crate::copilot::{format_transcript, ChatMessage};
use crate::page::{split_related_topics, Answer};
use crate::provider::{GenerateRequest, Provider};

pub const EMPTY_GENERATION: &str = "No content generated.";
pub const SUMMARY_FAILED: &str = "Failed to generate summary.";
pub const SUMMARY_EMPTY: &str = "Could not generate summary.";
pub const COPILOT_FAILED: &str = "Sorry, I encountered an error.";
pub const COPILOT_EMPTY: &str = "I'm having trouble thinking right now.";

/// Maximum characters of page text sent for summarisation
const SUMMARY_INPUT_LIMIT: usize = 5000;

/// Maximum characters of page text sent as copilot context
const COPILOT_CONTEXT_LIMIT: usize = 3000;

const SEARCH_SYSTEM: &str = "You are a helpful, accurate, and visually structured web assistant.";
const RESEARCH_SYSTEM: &str =
    "You are an advanced research analyst. Be thorough, objective, and detailed.";

fn search_prompt(query: &str) -> String {
    format!(
        r#"You are Brow, a smart browser engine. The user is searching for: "{query}".
Provide a comprehensive, well-structured, and formatted Markdown summary of the information found.
Use headings, bullet points, and code blocks where necessary to make it look like a beautiful web article.
Do not start with "Here is the information", just dive into the content.

At the very end of your response, strictly following this format, list 3 related follow-up questions separated by a pipe character like this:
||| RELATED: Question 1 | Question 2 | Question 3"#
    )
}

fn research_prompt(query: &str) -> String {
    format!(
        r#"You are Brow Deep Research. The user wants an in-depth report on: "{query}".

Conduct a deep analysis. Your response should be significantly longer and more detailed than a standard search.
Structure:
1. **Executive Summary**: Brief overview.
2. **Key Findings**: Detailed points with data where available.
3. **Context & History**: Background information.
4. **Different Perspectives**: Pros/Cons or Debates.
5. **Conclusion**.

Format in rich Markdown."#
    )
}

fn non_empty_or(text: String, fallback: &str) -> String {
    if text.trim().is_empty() {
        fallback.to_string()
    } else {
        text
    }
}

/// Cut `text` to at most `limit` characters on a char boundary
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Quick answer with web grounding and follow-up topics
#[instrument(skip(provider), fields(provider = provider.name()))]
pub async fn smart_search(provider: &dyn Provider, query: &str) -> Result<Answer> {
    let request = GenerateRequest::new(search_prompt(query))
        .with_system_instruction(SEARCH_SYSTEM)
        .with_web_search();

    let response = provider.generate(request).await?;
    let text = non_empty_or(response.text, EMPTY_GENERATION);
    let (summary, related_topics) = split_related_topics(&text);

    Ok(Answer {
        summary,
        grounding_links: response.grounding,
        related_topics,
    })
}

/// Long-form report with web grounding
#[instrument(skip(provider), fields(provider = provider.name()))]
pub async fn deep_research(provider: &dyn Provider, query: &str) -> Result<Answer> {
    let request = GenerateRequest::new(research_prompt(query))
        .with_system_instruction(RESEARCH_SYSTEM)
        .with_web_search();

    let response = provider.generate(request).await?;

    Ok(Answer {
        summary: non_empty_or(response.text, EMPTY_GENERATION),
        grounding_links: response.grounding,
        related_topics: Vec::new(),
    })
}

/// Up to three short follow-up queries for `context`; empty on failure
pub async fn suggest_topics(provider: &dyn Provider, context: &str) -> Vec<String> {
    let request = GenerateRequest::new(format!(
        "Given the context: \"{context}\", suggest 3 short follow-up search queries. Return ONLY the queries separated by newlines."
    ))
    .with_thinking_budget(0);

    match provider.generate(request).await {
        Ok(response) => response
            .text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .take(3)
            .map(str::to_string)
            .collect(),
        Err(e) => {
            warn!(error = %e, "Topic suggestion failed");
            Vec::new()
        }
    }
}

/// Three bullet points summarising `text`
pub async fn summarize(provider: &dyn Provider, text: &str) -> String {
    let request = GenerateRequest::new(format!(
        "Summarize the following text into 3 concise, high-impact bullet points. Return ONLY the bullet points.\n\nText: \"{}...\"",
        truncate_chars(text, SUMMARY_INPUT_LIMIT)
    ))
    .with_thinking_budget(0);

    match provider.generate(request).await {
        Ok(response) => non_empty_or(response.text, SUMMARY_EMPTY),
        Err(e) => {
            warn!(error = %e, "Summary failed");
            SUMMARY_FAILED.to_string()
        }
    }
}

/// Answer the last user message using the page as context
pub async fn copilot_reply(
    provider: &dyn Provider,
    history: &[ChatMessage],
    page_context: &str,
) -> String {
    let request = GenerateRequest::new(format!(
        r#"You are Brow Copilot, a helpful AI sidekick in a web browser.

Current Page Content:
"{}..."

Conversation History:
{}

Answer the last user query based on the current page content or general knowledge. Keep it concise and helpful."#,
        truncate_chars(page_context, COPILOT_CONTEXT_LIMIT),
        format_transcript(history)
    ))
    .with_thinking_budget(0);

    match provider.generate(request).await {
        Ok(response) => non_empty_or(response.text, COPILOT_EMPTY),
        Err(e) => {
            warn!(error = %e, "Copilot reply failed");
            COPILOT_FAILED.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::copilot::ChatRole;
    use crate::page::GroundingLink;
    use crate::provider::{GenerateResponse, MockProvider};

    #[tokio::test]
    async fn test_smart_search_splits_topics() {
        let provider = MockProvider::new();
        provider.queue_generated(
            GenerateResponse::text("# Tokio\nAsync runtime.\n||| RELATED: Mio | Futures | Axum")
                .with_grounding(vec![GroundingLink::new("https://tokio.rs", "Tokio")]),
        );

        let answer = smart_search(&provider, "tokio").await.unwrap();
        assert_eq!(answer.summary, "# Tokio\nAsync runtime.");
        assert_eq!(answer.related_topics, vec!["Mio", "Futures", "Axum"]);
        assert_eq!(answer.grounding_links.len(), 1);

        let request = provider.last_request().unwrap();
        assert!(request.web_search);
        assert!(request.prompt.contains("\"tokio\""));
        assert_eq!(request.system_instruction.as_deref(), Some(SEARCH_SYSTEM));
    }

    #[tokio::test]
    async fn test_smart_search_empty_text() {
        let provider = MockProvider::new().with_default("");
        let answer = smart_search(&provider, "x").await.unwrap();
        assert_eq!(answer.summary, EMPTY_GENERATION);
        assert!(answer.related_topics.is_empty());
    }

    #[tokio::test]
    async fn test_smart_search_failure_propagates() {
        let provider = MockProvider::new();
        provider.queue_failure("network down");
        let err = smart_search(&provider, "x").await.unwrap_err();
        assert_eq!(err.to_string(), "network down");
    }

    #[tokio::test]
    async fn test_deep_research_has_no_topics() {
        let provider = MockProvider::new().with_default("Report ||| RELATED: a | b");
        let answer = deep_research(&provider, "rust").await.unwrap();
        assert!(answer.related_topics.is_empty());
        assert!(provider.last_request().unwrap().prompt.contains("Executive Summary"));
    }

    #[tokio::test]
    async fn test_suggest_topics_limits_to_three() {
        let provider = MockProvider::new().with_default("one\n\n two \nthree\nfour");
        let topics = suggest_topics(&provider, "ctx").await;
        assert_eq!(topics, vec!["one", "two", "three"]);
        assert_eq!(provider.last_request().unwrap().thinking_budget, Some(0));
    }

    #[tokio::test]
    async fn test_suggest_topics_failure_is_empty() {
        let provider = MockProvider::new();
        provider.queue_failure("boom");
        assert!(suggest_topics(&provider, "ctx").await.is_empty());
    }

    #[tokio::test]
    async fn test_summarize_truncates_input() {
        let provider = MockProvider::new().with_default("- a\n- b\n- c");
        let long = "x".repeat(SUMMARY_INPUT_LIMIT + 100);

        assert_eq!(summarize(&provider, &long).await, "- a\n- b\n- c");
        let prompt = provider.last_request().unwrap().prompt;
        assert!(!prompt.contains(&"x".repeat(SUMMARY_INPUT_LIMIT + 1)));
    }

    #[tokio::test]
    async fn test_summarize_failure_message() {
        let provider = MockProvider::new();
        provider.queue_failure("boom");
        assert_eq!(summarize(&provider, "text").await, SUMMARY_FAILED);
    }

    #[tokio::test]
    async fn test_copilot_includes_transcript() {
        let provider = MockProvider::new().with_default("Sure.");
        let history = vec![ChatMessage::new(ChatRole::User, "Explain borrowing")];

        let reply = copilot_reply(&provider, &history, "Page about Rust").await;
        assert_eq!(reply, "Sure.");

        let prompt = provider.last_request().unwrap().prompt;
        assert!(prompt.contains("User: Explain borrowing"));
        assert!(prompt.contains("Page about Rust"));
    }

    #[tokio::test]
    async fn test_copilot_failure_message() {
        let provider = MockProvider::new();
        provider.queue_failure("boom");
        assert_eq!(copilot_reply(&provider, &[], "").await, COPILOT_FAILED);
    }

    #[test]
    fn test_truncate_chars_respects_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }
}
