//! Terminal Theme - palette to ratatui styles
//!
//! Maps the five-color browser palette onto terminal styles. Status colors
//! stay fixed across themes.

use ratatui::style::{Color, Modifier, Style};

use crate::theme::{parse_hex, Theme};

/// Resolved terminal colors for the active theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalTheme {
    pub background: Color,
    pub surface: Color,
    pub accent: Color,
    pub text: Color,
    pub text_secondary: Color,

    // Status colors
    pub success_green: Color,
    pub warning_orange: Color,
    pub error_red: Color,
}

/// `#rrggbb` to an RGB color; malformed values fall back to `Color::Reset`
pub fn hex_color(hex: &str) -> Color {
    parse_hex(hex)
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(Color::Reset)
}

impl From<&Theme> for TerminalTheme {
    fn from(theme: &Theme) -> Self {
        let colors = &theme.colors;
        Self {
            background: hex_color(&colors.background),
            surface: hex_color(&colors.surface),
            accent: hex_color(&colors.accent),
            text: hex_color(&colors.text),
            text_secondary: hex_color(&colors.text_secondary),

            success_green: Color::Rgb(63, 185, 80), // #3FB950
            warning_orange: Color::Rgb(210, 153, 34), // #D29922
            error_red: Color::Rgb(248, 81, 73),     // #F85149
        }
    }
}

impl TerminalTheme {
    // ─────────────────────────────────────────────────────────────────────
    // Styles
    // ─────────────────────────────────────────────────────────────────────

    /// Page background
    pub fn base(&self) -> Style {
        Style::default().bg(self.background).fg(self.text)
    }

    /// Raised surfaces: tab strip, omnibox, panels
    pub fn surface(&self) -> Style {
        Style::default().bg(self.surface).fg(self.text)
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn dimmed(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Bold accent for headings and the active tab
    pub fn header(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Selected row in lists
    pub fn selected(&self) -> Style {
        Style::default()
            .bg(self.accent)
            .fg(self.background)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            self.accent()
        } else {
            self.dimmed()
        }
    }

    pub fn success(&self) -> Style {
        Style::default().fg(self.success_green)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning_orange)
    }

    pub fn error(&self) -> Style {
        Style::default()
            .fg(self.error_red)
            .add_modifier(Modifier::BOLD)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Icons and Symbols
// ─────────────────────────────────────────────────────────────────────────────

/// UI icons used throughout the TUI
pub mod icons {
    pub const BACK: &str = "←";
    pub const FORWARD: &str = "→";
    pub const REFRESH: &str = "⟳";
    pub const SEARCH: &str = "⌕";
    pub const MIC: &str = "🎙";
    pub const GHOST: &str = "👻";
    pub const SPARKLE: &str = "✦";
    pub const LINK: &str = "↗";
    pub const CLOSE: &str = "×";
    pub const DEEP: &str = "◈";
    pub const CHECK: &str = "✓";
}
