//! TUI Module - the terminal browser
//!
//! Architecture:
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        UI LAYER (app.rs, widgets/)                  │
//! │  Pure rendering from BrowserState + UiState. Keys become Msgs.      │
//! └─────────────────────────────────────────────────────────────────────┘
//!                               │ Msg
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      DOMAIN LAYER (crate::state)                    │
//! │  update(state, msg) -> Command. No IO.                              │
//! └─────────────────────────────────────────────────────────────────────┘
//!                               │ Command            ▲ Msg (completions)
//!                               ▼                    │
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    EFFECT LAYER (crate::dispatcher)                 │
//! │  Spawns provider / speech calls, reports back over a channel.       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

mod app;
mod events;
mod state;
mod theme;

pub mod widgets;

use std::sync::Arc;

pub use app::TuiApp;
pub use state::{Focus, InputMode, UiState};
pub use theme::TerminalTheme;

use crate::config::BrowConfig;
use crate::provider::Provider;
use crate::speech::SpeechCapability;
use crate::state::BrowserState;
use crate::theme::{find_theme, ThemeState};

/// Run the browser until the user quits
pub async fn run(config: &BrowConfig, provider: Arc<dyn Provider>) -> anyhow::Result<()> {
    let theme = match config.default_theme.as_deref() {
        Some(id) => ThemeState::new(find_theme(id)?),
        None => ThemeState::default(),
    };
    let speech = SpeechCapability::from_config(config);

    let app = TuiApp::new(BrowserState::new(theme), provider, speech);
    app.run().await
}
