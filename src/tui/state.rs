//! UiState - terminal-only view state
//!
//! Everything the browser model does not care about: which text field has
//! the keyboard, list cursors, scroll offsets and the animation tick.
//! Browser semantics live in [`crate::state::BrowserState`].

use crate::page::{PageKind, NEW_TAB_URL};
use crate::state::{BrowserState, ViewMode};
use crate::theme::available_themes;
use crate::widget::{ShortcutAction, WidgetType, NEWS_HEADLINES, SHORTCUTS};

/// Which text field, if any, receives typed characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Omnibox,
    Copilot,
}

/// Region that receives arrow keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Content,
    History,
    Copilot,
    Grid,
    ThemeStore,
    Customize,
}

impl Focus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Content => "PAGE",
            Self::History => "HISTORY",
            Self::Copilot => "COPILOT",
            Self::Grid => "TABS",
            Self::ThemeStore => "THEMES",
            Self::Customize => "CUSTOMIZE",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub input_mode: InputMode,
    pub omnibox: String,
    pub copilot_input: String,

    /// Side panel focused instead of the page (history / copilot)
    pub side_focus: Option<Focus>,

    // Cursors
    pub content_cursor: usize,
    pub history_cursor: usize,
    pub grid_cursor: usize,
    pub theme_cursor: usize,
    pub widget_cursor: usize,

    /// Lines scrolled off the top of the page
    pub scroll: u16,
    pub show_help: bool,
    /// Animation tick, wraps
    pub frame: u8,
}

impl UiState {
    pub fn tick(&mut self) {
        self.frame = self.frame.wrapping_add(1);
    }

    /// Focus for the current frame; modal views win over side panels
    pub fn focus(&self, browser: &BrowserState) -> Focus {
        if browser.theme_store_open {
            Focus::ThemeStore
        } else if browser.view_mode == ViewMode::Grid {
            Focus::Grid
        } else if browser.customizing && browser.active_page().kind == PageKind::NewTab {
            Focus::Customize
        } else {
            match self.side_focus {
                Some(Focus::History) if browser.history_open => Focus::History,
                Some(Focus::Copilot) if browser.copilot_open => Focus::Copilot,
                _ => Focus::Content,
            }
        }
    }

    /// Cycle keyboard focus between the page and open side panels
    pub fn cycle_side_focus(&mut self, browser: &BrowserState) {
        let mut order = vec![None];
        if browser.history_open {
            order.push(Some(Focus::History));
        }
        if browser.copilot_open {
            order.push(Some(Focus::Copilot));
        }
        let pos = order
            .iter()
            .position(|f| *f == self.side_focus)
            .unwrap_or(0);
        self.side_focus = order[(pos + 1) % order.len()];
    }

    /// Start editing the omnibox, seeded with the tab's URL
    pub fn focus_omnibox(&mut self, browser: &BrowserState) {
        let url = &browser.tabs.active().url;
        self.omnibox = if url == NEW_TAB_URL {
            String::new()
        } else {
            url.clone()
        };
        self.input_mode = InputMode::Omnibox;
    }

    /// Reset per-page cursors after the visible page changed
    pub fn page_changed(&mut self) {
        self.content_cursor = 0;
        self.scroll = 0;
    }

    /// Move the cursor of the focused list by `delta`, clamped to its length
    pub fn move_cursor(&mut self, browser: &BrowserState, delta: isize) {
        let len = list_len(self.focus(browser), browser);
        let cursor = match self.focus(browser) {
            Focus::Content => {
                if len == 0 {
                    self.scroll = scrolled(self.scroll, delta);
                    return;
                }
                &mut self.content_cursor
            }
            Focus::History => &mut self.history_cursor,
            Focus::Grid => &mut self.grid_cursor,
            Focus::ThemeStore => &mut self.theme_cursor,
            Focus::Customize => &mut self.widget_cursor,
            Focus::Copilot => {
                self.scroll = scrolled(self.scroll, delta);
                return;
            }
        };
        *cursor = clamp_step(*cursor, delta, len);
    }
}

fn scrolled(scroll: u16, delta: isize) -> u16 {
    if delta < 0 {
        scroll.saturating_sub(delta.unsigned_abs() as u16)
    } else {
        scroll.saturating_add(delta as u16)
    }
}

fn clamp_step(cursor: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let next = cursor as isize + delta;
    next.clamp(0, len as isize - 1) as usize
}

/// Number of selectable rows in a focus region
pub fn list_len(focus: Focus, browser: &BrowserState) -> usize {
    match focus {
        Focus::Content => content_items(browser).len(),
        Focus::History => browser.tabs.active().history().len(),
        Focus::Grid => browser.tabs.len(),
        Focus::ThemeStore => available_themes().len(),
        Focus::Customize => browser.dashboard.widgets().len(),
        Focus::Copilot => 0,
    }
}

/// A selectable row of the content area
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentItem {
    Query(String),
    Recents,
}

/// Rows reachable from the current page, in display order.
///
/// New-Tab: enabled shortcuts then news headlines. Result page: related topics.
pub fn content_items(browser: &BrowserState) -> Vec<ContentItem> {
    let page = browser.active_page();
    match page.kind {
        PageKind::NewTab => {
            let mut items = Vec::new();
            if browser.dashboard.is_enabled(WidgetType::Shortcuts) {
                items.extend(SHORTCUTS.iter().map(|(_, action)| match action {
                    ShortcutAction::Search(query) => ContentItem::Query(query.to_string()),
                    ShortcutAction::Recents => ContentItem::Recents,
                }));
            }
            if browser.dashboard.is_enabled(WidgetType::News) {
                items.extend(NEWS_HEADLINES.iter().map(|h| ContentItem::Query(h.to_string())));
            }
            items
        }
        PageKind::SearchResult | PageKind::DeepDive => {
            page.topics().iter().cloned().map(ContentItem::Query).collect()
        }
        PageKind::Error => Vec::new(),
    }
}

/// History entry index for a row of the newest-first history panel
pub fn history_row_to_index(row: usize, len: usize) -> Option<usize> {
    (row < len).then(|| len - 1 - row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{update, Msg};

    #[test]
    fn test_focus_priorities() {
        let mut browser = BrowserState::default();
        let mut ui = UiState::default();
        assert_eq!(ui.focus(&browser), Focus::Content);

        browser.history_open = true;
        ui.side_focus = Some(Focus::History);
        assert_eq!(ui.focus(&browser), Focus::History);

        browser.view_mode = ViewMode::Grid;
        assert_eq!(ui.focus(&browser), Focus::Grid);

        browser.theme_store_open = true;
        assert_eq!(ui.focus(&browser), Focus::ThemeStore);
    }

    #[test]
    fn test_cycle_side_focus_skips_closed_panels() {
        let mut browser = BrowserState::default();
        let mut ui = UiState::default();

        ui.cycle_side_focus(&browser);
        assert_eq!(ui.side_focus, None);

        browser.copilot_open = true;
        ui.cycle_side_focus(&browser);
        assert_eq!(ui.side_focus, Some(Focus::Copilot));
        ui.cycle_side_focus(&browser);
        assert_eq!(ui.side_focus, None);
    }

    #[test]
    fn test_content_items_follow_widgets() {
        let mut browser = BrowserState::default();
        assert_eq!(content_items(&browser).len(), SHORTCUTS.len());

        update(&mut browser, Msg::ToggleWidget("w4".into()));
        let items = content_items(&browser);
        assert_eq!(items.len(), SHORTCUTS.len() + NEWS_HEADLINES.len());
        assert_eq!(items[3], ContentItem::Recents);
        assert_eq!(
            items.last(),
            Some(&ContentItem::Query(NEWS_HEADLINES[2].to_string()))
        );
    }

    #[test]
    fn test_move_cursor_clamps() {
        let browser = BrowserState::default();
        let mut ui = UiState::default();

        ui.move_cursor(&browser, -1);
        assert_eq!(ui.content_cursor, 0);
        ui.move_cursor(&browser, 100);
        assert_eq!(ui.content_cursor, SHORTCUTS.len() - 1);
    }

    #[test]
    fn test_omnibox_seed_hides_newtab_url() {
        let browser = BrowserState::default();
        let mut ui = UiState {
            omnibox: "stale".into(),
            ..Default::default()
        };
        ui.focus_omnibox(&browser);
        assert_eq!(ui.omnibox, "");
        assert_eq!(ui.input_mode, InputMode::Omnibox);
    }

    #[test]
    fn test_history_rows_are_newest_first() {
        assert_eq!(history_row_to_index(0, 3), Some(2));
        assert_eq!(history_row_to_index(2, 3), Some(0));
        assert_eq!(history_row_to_index(3, 3), None);
    }
}
