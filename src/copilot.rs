//! Copilot sidebar conversation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const WELCOME_MESSAGE: &str = "Hi! I'm Brow Copilot. I can help you research, summarize, or answer questions about the current page.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

impl ChatRole {
    pub fn label(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Model => "Assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    fn welcome() -> Self {
        Self {
            id: "welcome".to_string(),
            ..Self::new(ChatRole::Model, WELCOME_MESSAGE)
        }
    }
}

#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    thinking: bool,
}

impl Default for Conversation {
    fn default() -> Self {
        Self {
            messages: vec![ChatMessage::welcome()],
            thinking: false,
        }
    }
}

impl Conversation {
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_thinking(&self) -> bool {
        self.thinking
    }

    /// Record a user question. Returns the transcript to send, or `None`
    /// when the input is blank.
    pub fn ask(&mut self, text: &str) -> Option<Vec<ChatMessage>> {
        if text.trim().is_empty() {
            return None;
        }
        self.messages.push(ChatMessage::new(ChatRole::User, text));
        self.thinking = true;
        Some(self.messages.clone())
    }

    pub fn receive(&mut self, reply: impl Into<String>) {
        self.messages.push(ChatMessage::new(ChatRole::Model, reply));
        self.thinking = false;
    }
}

/// Render a transcript as `User: ...` / `Assistant: ...` lines
pub fn format_transcript(history: &[ChatMessage]) -> String {
    history
        .iter()
        .map(|m| format!("{}: {}", m.role.label(), m.text))
        .collect::<Vec<_>>()
        .join("\n")
}
