//! Voice search capability
//!
//! A terminal has no microphone API, so recognition is delegated to an
//! external command (e.g. a whisper wrapper) that records one utterance and
//! prints the transcript on stdout.

use std::time::Duration;

use tracing::{debug, instrument};

use crate::config::BrowConfig;
use crate::error::{BrowError, Result};

/// Longest a single recognition may run before it is abandoned
const LISTEN_TIMEOUT: Duration = Duration::from_secs(60);

/// Runs the configured program and reads its transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRecognizer {
    program: String,
    args: Vec<String>,
}

impl CommandRecognizer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Record one utterance. Returns the trimmed transcript.
    #[instrument(skip(self), fields(program = %self.program))]
    pub async fn listen(&self) -> Result<String> {
        let output = tokio::time::timeout(
            LISTEN_TIMEOUT,
            tokio::process::Command::new(&self.program)
                .args(&self.args)
                .kill_on_drop(true)
                .output(),
        )
        .await
        .map_err(|_| {
            BrowError::Speech(format!(
                "No transcript after {}s",
                LISTEN_TIMEOUT.as_secs()
            ))
        })?
        .map_err(|e| BrowError::Speech(format!("Failed to start '{}': {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BrowError::Speech(format!(
                "'{}' exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        let transcript = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if transcript.is_empty() {
            return Err(BrowError::Speech("Nothing was recognized".to_string()));
        }

        debug!(chars = transcript.len(), "Speech transcript received");
        Ok(transcript)
    }
}

/// Whether voice search can be offered at all
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SpeechCapability {
    #[default]
    Unsupported,
    Available(CommandRecognizer),
}

impl SpeechCapability {
    /// Build from `speech_command`; a missing or empty command is unsupported
    pub fn from_config(config: &BrowConfig) -> Self {
        match config.speech_command.as_deref() {
            Some([program, args @ ..]) if !program.trim().is_empty() => {
                Self::Available(CommandRecognizer::new(program.clone(), args.to_vec()))
            }
            _ => Self::Unsupported,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    pub async fn listen(&self) -> Result<String> {
        match self {
            Self::Unsupported => Err(BrowError::SpeechUnsupported),
            Self::Available(recognizer) => recognizer.listen().await,
        }
    }
}
