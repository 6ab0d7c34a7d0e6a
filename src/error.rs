//! Error types with fix suggestions

use thiserror::Error;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

pub type Result<T> = std::result::Result<T, BrowError>;

#[derive(Error, Debug)]
pub enum BrowError {
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Unknown provider: '{name}'. Available: gemini, mock")]
    UnknownProvider { name: String },

    #[error("No API key configured for provider '{provider}'")]
    MissingApiKey { provider: String },

    #[error("Config error: {reason}")]
    Config { reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ─────────────────────────────────────────────────────────────
    // Navigation errors
    // ─────────────────────────────────────────────────────────────
    #[error("History index {index} out of range (history has {len} entries)")]
    HistoryIndexOutOfRange { index: usize, len: usize },

    #[error("Tab '{tab_id}' not found")]
    TabNotFound { tab_id: String },

    #[error("Unknown theme '{id}'")]
    UnknownTheme { id: String },

    #[error("Unknown widget '{id}'")]
    UnknownWidget { id: String },

    // ─────────────────────────────────────────────────────────────
    // Speech capability errors
    // ─────────────────────────────────────────────────────────────
    #[error("Voice search is not supported in this terminal")]
    SpeechUnsupported,

    #[error("Speech recognition failed: {0}")]
    Speech(String),
}

impl FixSuggestion for BrowError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            BrowError::Provider(_) => Some("Check network access and the Gemini API quota"),
            BrowError::UnknownProvider { .. } => Some("Use --provider gemini or --provider mock"),
            BrowError::MissingApiKey { .. } => {
                Some("Set GEMINI_API_KEY, add api_key to ~/.config/brow/config.toml, or pass --provider mock to browse offline")
            }
            BrowError::Config { .. } => Some("Check TOML syntax in ~/.config/brow/config.toml"),
            BrowError::Io(_) => Some("Check file path and permissions"),
            BrowError::HistoryIndexOutOfRange { .. } => None,
            BrowError::TabNotFound { .. } => None,
            BrowError::UnknownTheme { .. } => Some("Run `brow themes` to list available themes"),
            BrowError::UnknownWidget { .. } => None,
            BrowError::SpeechUnsupported => {
                Some("Set speech_command in config to a program that prints a transcript")
            }
            BrowError::Speech(_) => Some("Run the speech_command manually to check its output"),
        }
    }
}
