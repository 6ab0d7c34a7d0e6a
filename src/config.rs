//! Brow Configuration Module
//!
//! Config is stored in `~/.config/brow/config.toml`.
//!
//! ## Priority Order (highest to lowest)
//!
//! 1. CLI flags (`--provider`, `--model`)
//! 2. Environment variables (`GEMINI_API_KEY`, then `API_KEY`)
//! 3. Config file
//! 4. Defaults

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BrowError, Result};
use crate::provider::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Environment variables checked for the API key, in order
const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BrowConfig {
    /// Gemini API key
    pub api_key: Option<String>,

    /// Provider name (gemini, mock)
    pub provider: Option<String>,

    /// Model for every call (default: gemini-2.5-flash)
    pub model: Option<String>,

    /// API host override
    pub base_url: Option<String>,

    /// Theme id applied at startup
    pub default_theme: Option<String>,

    /// Program + args that record speech and print the transcript on stdout
    pub speech_command: Option<Vec<String>>,
}

impl BrowConfig {
    /// Returns `~/.config/brow/` on Unix, `%APPDATA%/brow/` on Windows
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("brow")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// File the TUI writes its tracing output to
    pub fn log_path() -> PathBuf {
        Self::config_dir().join("brow.log")
    }

    /// Load from the default location; missing file means defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load from `path`. Returns an error if the file exists but is malformed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| BrowError::Config {
            reason: format!("Failed to read config file: {}", e),
        })?;

        toml::from_str(&content).map_err(|e| BrowError::Config {
            reason: format!("Failed to parse config file: {}", e),
        })
    }

    /// Merge with environment variables; env takes precedence over the file
    pub fn with_env(mut self) -> Self {
        let from_env = API_KEY_VARS
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|key| !key.is_empty());

        if let Some(key) = from_env {
            self.api_key = Some(key);
        }
        self
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }

    /// Provider to use; `mock` only when asked for by name
    pub fn provider(&self) -> &str {
        self.provider.as_deref().unwrap_or("gemini")
    }

    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }
}

/// Mask an API key for display, e.g. "AIzaSy***"
pub fn mask_api_key(key: &str, visible_chars: usize) -> String {
    if key.is_empty() {
        return String::new();
    }

    let visible: String = key.chars().take(visible_chars).collect();
    format!("{}***", visible)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_path_contains_brow() {
        let path = BrowConfig::config_path();
        assert!(path.to_string_lossy().contains("brow"));
        assert!(path.to_string_lossy().ends_with("config.toml"));
        assert_eq!(path.parent().unwrap(), BrowConfig::config_dir());
    }

    #[test]
    fn test_defaults() {
        let config = BrowConfig::default();
        assert_eq!(config.model(), DEFAULT_MODEL);
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.provider(), "gemini");
    }

    #[test]
    fn test_provider_defaults_to_gemini_without_key() {
        let config = BrowConfig::default();
        assert!(config.api_key().is_none());
        assert_eq!(config.provider(), "gemini");

        let result = crate::provider::create_provider(config.provider(), &config);
        assert!(matches!(result, Err(BrowError::MissingApiKey { .. })));
    }

    #[test]
    fn test_explicit_provider_wins() {
        let config = BrowConfig {
            api_key: Some("AIza-test".into()),
            ..Default::default()
        };
        assert_eq!(config.provider(), "gemini");

        let explicit = BrowConfig {
            provider: Some("mock".into()),
            ..config
        };
        assert_eq!(explicit.provider(), "mock");
    }

    #[test]
    fn test_empty_key_is_ignored() {
        let config = BrowConfig {
            api_key: Some(String::new()),
            ..Default::default()
        };
        assert!(config.api_key().is_none());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = BrowConfig::load_from(&temp_dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, BrowConfig::default());
    }

    #[test]
    fn test_load_full_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
api_key = "AIza-test"
model = "gemini-2.5-pro"
default_theme = "cyberpunk"
speech_command = ["listen", "--once"]
"#,
        )
        .unwrap();

        let config = BrowConfig {
            api_key: Some("AIza-test".into()),
            model: Some("gemini-2.5-pro".into()),
            default_theme: Some("cyberpunk".into()),
            speech_command: Some(vec!["listen".into(), "--once".into()]),
            ..Default::default()
        };

        assert_eq!(BrowConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "model = [unclosed").unwrap();

        let err = BrowConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, BrowError::Config { .. }));
    }

    #[test]
    fn test_mask_api_key() {
        assert_eq!(mask_api_key("AIzaSyABCDEF", 6), "AIzaSy***");
        assert_eq!(mask_api_key("abc", 6), "abc***");
        assert_eq!(mask_api_key("", 6), "");
    }
}
