//! Themes - named five-color palettes and Ghost mode
//!
//! Exactly one theme is active at a time. Ghost mode swaps in a fixed
//! palette and remembers the theme it replaced in a single slot.

use serde::{Deserialize, Serialize};

use crate::error::{BrowError, Result};

pub const GHOST_THEME_ID: &str = "ghost";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Main app background
    pub background: String,
    /// Secondary backgrounds (cards, bars)
    pub surface: String,
    /// Interactive elements
    pub accent: String,
    pub text: String,
    pub text_secondary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub id: String,
    pub name: String,
    pub colors: Palette,
}

impl Theme {
    fn new(id: &str, name: &str, colors: [&str; 5]) -> Self {
        let [background, surface, accent, text, text_secondary] = colors;
        Self {
            id: id.to_string(),
            name: name.to_string(),
            colors: Palette {
                background: background.to_string(),
                surface: surface.to_string(),
                accent: accent.to_string(),
                text: text.to_string(),
                text_secondary: text_secondary.to_string(),
            },
        }
    }

    /// The fixed Ghost mode palette
    pub fn ghost() -> Self {
        Self::new(
            GHOST_THEME_ID,
            "Ghost Mode",
            ["#1a1a1a", "#2d2d2d", "#a855f7", "#d4d4d4", "#737373"],
        )
    }
}

/// Built-in theme store, default first
pub fn available_themes() -> Vec<Theme> {
    vec![
        Theme::new(
            "default-dark",
            "Slate Dark",
            ["#020617", "#1e293b", "#6366f1", "#f1f5f9", "#94a3b8"],
        ),
        Theme::new(
            "midnight-blue",
            "Midnight Blue",
            ["#0b1021", "#151b2e", "#3b82f6", "#e2e8f0", "#64748b"],
        ),
        Theme::new(
            "forest-depths",
            "Forest Depths",
            ["#052e16", "#064e3b", "#34d399", "#ecfdf5", "#6ee7b7"],
        ),
        Theme::new(
            "sunset-vibes",
            "Sunset Vibes",
            ["#2a0a18", "#4c1d2e", "#fb7185", "#fff1f2", "#fda4af"],
        ),
        Theme::new(
            "cyberpunk",
            "Cyberpunk",
            ["#000000", "#18181b", "#e879f9", "#ffffff", "#a1a1aa"],
        ),
    ]
}

pub fn find_theme(id: &str) -> Result<Theme> {
    available_themes()
        .into_iter()
        .find(|t| t.id == id)
        .ok_or_else(|| BrowError::UnknownTheme { id: id.to_string() })
}

/// Parse `#rrggbb` into its components
pub fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

// ─────────────────────────────────────────────────────────────────────────────
// Active theme + Ghost mode
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ThemeState {
    active: Theme,
    ghost: bool,
    remembered: Option<Theme>,
}

impl Default for ThemeState {
    fn default() -> Self {
        let default = available_themes().swap_remove(0);
        Self::new(default)
    }
}

impl ThemeState {
    pub fn new(active: Theme) -> Self {
        Self {
            active,
            ghost: false,
            remembered: None,
        }
    }

    pub fn active(&self) -> &Theme {
        &self.active
    }

    pub fn is_ghost(&self) -> bool {
        self.ghost
    }

    /// Replace the active theme. Ignored in Ghost mode.
    pub fn select(&mut self, theme: Theme) -> bool {
        if self.ghost {
            return false;
        }
        self.active = theme;
        true
    }

    pub fn toggle_ghost(&mut self) {
        if self.ghost {
            self.ghost = false;
            if let Some(prev) = self.remembered.take() {
                self.active = prev;
            }
        } else {
            self.ghost = true;
            self.remembered = Some(std::mem::replace(&mut self.active, Theme::ghost()));
        }
    }
}
