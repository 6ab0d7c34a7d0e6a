//! TUI Widgets - UI Components
//!
//! Each widget is a stateless renderer. Browser logic stays in
//! [`crate::state`].

mod markdown;
mod spinner;
mod tab_strip;

pub use markdown::{render_markdown, MarkdownView};
pub use spinner::{LoadingBanner, Spinner, SpinnerStyle};
pub use tab_strip::TabStrip;

/// Common widget utilities
pub mod utils {
    use ratatui::layout::{Constraint, Flex, Layout, Rect};

    /// Truncate string with ellipsis, counting chars
    pub fn truncate(s: &str, max_len: usize) -> String {
        if s.chars().count() <= max_len {
            s.to_string()
        } else if max_len <= 3 {
            s.chars().take(max_len).collect()
        } else {
            let head: String = s.chars().take(max_len - 3).collect();
            format!("{}...", head)
        }
    }

    /// Rect of the given percentage size centered in `area`
    pub fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
        let [row] = Layout::vertical([Constraint::Percentage(percent_y)])
            .flex(Flex::Center)
            .areas(area);
        let [cell] = Layout::horizontal([Constraint::Percentage(percent_x)])
            .flex(Flex::Center)
            .areas(row);
        cell
    }
}
