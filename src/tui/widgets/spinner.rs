//! Loading indicators
//!
//! Shown while a tab waits for its page to be generated.

use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

use super::utils::truncate;

/// Ticks each spinner frame stays on screen
const TICKS_PER_FRAME: u8 = 6;
/// Ticks per step of the "Generating..." dots
const TICKS_PER_DOT: u8 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpinnerStyle {
    /// Small braille wheel, used inline (tab strip, omnibox)
    #[default]
    Braille,
    /// Filling circle, used for the full-page loading banner
    Pulse,
}

impl SpinnerStyle {
    fn frames(self) -> &'static [char] {
        match self {
            Self::Braille => &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'],
            Self::Pulse => &['○', '◔', '◑', '◕', '●', '◕', '◑', '◔'],
        }
    }
}

/// One animated glyph derived from the UI tick
#[derive(Debug, Clone, Copy)]
pub struct Spinner {
    tick: u8,
    style: SpinnerStyle,
}

impl Spinner {
    pub fn new(tick: u8) -> Self {
        Self {
            tick,
            style: SpinnerStyle::default(),
        }
    }

    pub fn pulse(mut self) -> Self {
        self.style = SpinnerStyle::Pulse;
        self
    }

    pub fn current_char(&self) -> char {
        let frames = self.style.frames();
        frames[(self.tick / TICKS_PER_FRAME) as usize % frames.len()]
    }
}

/// Centered block for a loading tab: pulse glyph, tab title, animated hint
pub struct LoadingBanner<'a> {
    title: &'a str,
    tick: u8,
    glyph_style: Style,
    title_style: Style,
    hint_style: Style,
}

impl<'a> LoadingBanner<'a> {
    pub fn new(title: &'a str, tick: u8) -> Self {
        Self {
            title,
            tick,
            glyph_style: Style::default(),
            title_style: Style::default(),
            hint_style: Style::default(),
        }
    }

    pub fn styles(mut self, glyph: Style, title: Style, hint: Style) -> Self {
        self.glyph_style = glyph;
        self.title_style = title;
        self.hint_style = hint;
        self
    }

    /// "Generating" followed by zero to three dots
    pub fn hint(&self) -> String {
        let dots = (self.tick / TICKS_PER_DOT) as usize % 4;
        format!("Generating{}", ".".repeat(dots))
    }
}

impl Widget for LoadingBanner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let rows = [
            (Spinner::new(self.tick).pulse().current_char().to_string(), self.glyph_style),
            (truncate(self.title, area.width as usize), self.title_style),
            (self.hint(), self.hint_style),
        ];

        let top = area.y + area.height.saturating_sub(rows.len() as u16) / 2;
        for (offset, (text, style)) in rows.iter().enumerate() {
            let y = top + offset as u16;
            if y >= area.bottom() {
                break;
            }
            let width = text.chars().count() as u16;
            let x = area.x + area.width.saturating_sub(width) / 2;
            buf.set_string(x, y, text, *style);
        }
    }
}
