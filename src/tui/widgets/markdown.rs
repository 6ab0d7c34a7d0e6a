//! Markdown View Widget
//!
//! Renders the Markdown body of a generated page as styled terminal lines.
//! Covers what the model actually emits: headings, lists, quotes, fenced
//! code, rules, `**bold**`, `*italic*` and `` `code` `` spans.

use once_cell::sync::Lazy;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use regex::Regex;

use crate::tui::theme::TerminalTheme;

static ORDERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)[.)]\s+(.*)$").unwrap());

/// Inline markers, longest first so `**` wins over `*`
static INLINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*|__([^_]+)__|`([^`]+)`|\*([^*\s][^*]*)\*").unwrap());

/// Convert Markdown into styled lines
pub fn render_markdown(text: &str, theme: &TerminalTheme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut in_code = false;

    let code_style = Style::default().fg(theme.accent).bg(theme.surface);

    for raw in text.lines() {
        let trimmed = raw.trim_start();

        if trimmed.starts_with("```") {
            in_code = !in_code;
            continue;
        }
        if in_code {
            lines.push(Line::from(Span::styled(format!("  {}", raw), code_style)));
            continue;
        }

        if trimmed.is_empty() {
            lines.push(Line::default());
            continue;
        }

        if let Some(line) = heading(trimmed, theme) {
            lines.push(line);
            continue;
        }

        if is_rule(trimmed) {
            lines.push(Line::from(Span::styled("─".repeat(40), theme.dimmed())));
            continue;
        }

        let indent = " ".repeat(raw.len() - trimmed.len());

        if let Some(rest) = trimmed
            .strip_prefix("- ")
            .or_else(|| trimmed.strip_prefix("* "))
            .or_else(|| trimmed.strip_prefix("+ "))
        {
            let mut spans = vec![Span::raw(indent), Span::styled("• ", theme.accent())];
            spans.extend(inline_spans(rest, theme.text(), theme));
            lines.push(Line::from(spans));
            continue;
        }

        if let Some(caps) = ORDERED_ITEM.captures(trimmed) {
            let mut spans = vec![
                Span::raw(indent),
                Span::styled(format!("{}. ", &caps[1]), theme.accent()),
            ];
            spans.extend(inline_spans(&caps[2], theme.text(), theme));
            lines.push(Line::from(spans));
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix('>') {
            let mut spans = vec![Span::styled("│ ", theme.accent())];
            spans.extend(inline_spans(
                rest.trim_start(),
                theme.dimmed().add_modifier(Modifier::ITALIC),
                theme,
            ));
            lines.push(Line::from(spans));
            continue;
        }

        lines.push(Line::from(inline_spans(raw, theme.text(), theme)));
    }

    lines
}

fn heading(line: &str, theme: &TerminalTheme) -> Option<Line<'static>> {
    let level = line.chars().take_while(|c| *c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let title = line[level..].strip_prefix(' ')?;

    let style = match level {
        1 => theme.header().add_modifier(Modifier::UNDERLINED),
        2 => theme.header(),
        _ => theme.text().add_modifier(Modifier::BOLD),
    };
    Some(Line::from(Span::styled(title.trim().to_string(), style)))
}

fn is_rule(line: &str) -> bool {
    let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    compact.len() >= 3
        && (compact.chars().all(|c| c == '-')
            || compact.chars().all(|c| c == '*')
            || compact.chars().all(|c| c == '_'))
}

/// Split a line into styled spans for bold, italic and code markers
fn inline_spans(text: &str, base: Style, theme: &TerminalTheme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut last = 0;

    for caps in INLINE.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > last {
            spans.push(Span::styled(text[last..whole.start()].to_string(), base));
        }

        let (content, style) = if let Some(m) = caps.get(1).or_else(|| caps.get(2)) {
            (m.as_str(), base.add_modifier(Modifier::BOLD))
        } else if let Some(m) = caps.get(3) {
            (m.as_str(), Style::default().fg(theme.accent).bg(theme.surface))
        } else if let Some(m) = caps.get(4) {
            (m.as_str(), base.add_modifier(Modifier::ITALIC))
        } else {
            continue;
        };
        spans.push(Span::styled(content.to_string(), style));
        last = whole.end();
    }

    if last < text.len() {
        spans.push(Span::styled(text[last..].to_string(), base));
    }
    spans
}

/// Scrollable Markdown page
pub struct MarkdownView<'a> {
    text: &'a str,
    theme: &'a TerminalTheme,
    scroll: u16,
}

impl<'a> MarkdownView<'a> {
    pub fn new(text: &'a str, theme: &'a TerminalTheme) -> Self {
        Self {
            text,
            theme,
            scroll: 0,
        }
    }

    /// Set scroll offset
    pub fn scroll(mut self, scroll: u16) -> Self {
        self.scroll = scroll;
        self
    }
}

impl Widget for MarkdownView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let lines = render_markdown(self.text, self.theme);
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0))
            .render(area, buf);
    }
}
