//! Tab Strip Widget
//!
//! Horizontal strip of browser tabs: status glyph, title, close marker.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use super::spinner::Spinner;
use super::utils::truncate;
use crate::tui::theme::icons;
use crate::tab::{Tab, TabStatus};

/// Widest a single tab title may grow
const MAX_TITLE_WIDTH: usize = 24;

/// Horizontal tab strip widget
pub struct TabStrip<'a> {
    tabs: &'a [Tab],
    selected: usize,
    /// Animation tick for loading tabs
    frame: u8,
    inactive_style: Style,
    active_style: Style,
    error_color: Color,
    separator: &'a str,
}

impl<'a> TabStrip<'a> {
    pub fn new(tabs: &'a [Tab], selected: usize) -> Self {
        Self {
            tabs,
            selected,
            frame: 0,
            inactive_style: Style::default().fg(Color::DarkGray),
            active_style: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            error_color: Color::Red,
            separator: " │ ",
        }
    }

    pub fn frame(mut self, frame: u8) -> Self {
        self.frame = frame;
        self
    }

    /// Set the inactive and active tab styles
    pub fn styles(mut self, inactive: Style, active: Style) -> Self {
        self.inactive_style = inactive;
        self.active_style = active;
        self
    }

    pub fn error_color(mut self, color: Color) -> Self {
        self.error_color = color;
        self
    }

    /// Glyph shown before a tab title
    fn status_glyph(&self, status: TabStatus) -> String {
        match status {
            TabStatus::Loading => Spinner::new(self.frame).current_char().to_string(),
            TabStatus::Error => "!".to_string(),
            TabStatus::Idle | TabStatus::Complete => "◦".to_string(),
        }
    }

    pub fn to_line(&self) -> Line<'a> {
        let mut spans = Vec::new();

        for (i, tab) in self.tabs.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(self.separator, self.inactive_style));
            }

            let style = if i == self.selected {
                self.active_style
            } else {
                self.inactive_style
            };
            let glyph_style = match tab.status {
                TabStatus::Error => style.fg(self.error_color),
                _ => style,
            };

            spans.push(Span::styled(self.status_glyph(tab.status), glyph_style));
            spans.push(Span::styled(
                format!(" {} ", truncate(&tab.title, MAX_TITLE_WIDTH)),
                style,
            ));
            if i == self.selected {
                spans.push(Span::styled(icons::CLOSE, self.inactive_style));
            }
        }

        Line::from(spans)
    }
}

impl Widget for TabStrip<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 || self.tabs.is_empty() {
            return;
        }

        let line = self.to_line();
        buf.set_line(area.x, area.y, &line, area.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tab::{TabId, TabRegistry};

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_strip_lists_titles() {
        let mut registry = TabRegistry::new();
        registry.create();
        let strip = TabStrip::new(registry.tabs(), 1);
        let text = line_text(&strip.to_line());

        assert_eq!(text.matches("New Tab").count(), 2);
        assert!(text.contains('│'));
        assert!(text.ends_with('×'));
    }

    #[test]
    fn test_loading_tab_shows_spinner() {
        let mut tab = Tab::fresh(TabId::new("t"));
        tab.begin_request(Some("rust"), "rust");
        let tabs = [tab];
        let strip = TabStrip::new(&tabs, 0).frame(0);

        assert!(line_text(&strip.to_line()).starts_with('⠋'));
    }

    #[test]
    fn test_long_title_truncated() {
        let mut tab = Tab::fresh(TabId::new("t"));
        tab.title = "x".repeat(80);
        let tabs = [tab];
        let text = line_text(&TabStrip::new(&tabs, 0).to_line());
        assert!(text.contains("..."));
        assert!(text.chars().count() < 40);
    }

    #[test]
    fn test_render_into_buffer() {
        let registry = TabRegistry::new();
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        TabStrip::new(registry.tabs(), 0).render(area, &mut buf);
        assert_eq!(buf[(2, 0)].symbol(), "N");
    }
}
