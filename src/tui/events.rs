//! Event Handling - Keyboard input processing
//!
//! Keys either edit terminal-only state ([`UiState`]) or become a [`Msg`]
//! for the browser reducer.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use super::state::{content_items, history_row_to_index, ContentItem, Focus, InputMode, UiState};
use crate::page::PageKind;
use crate::state::{BrowserState, Msg};
use crate::theme::available_themes;

/// Handle one key press. Returns the message to feed the reducer, if any.
pub fn handle_key_event(key: KeyEvent, ui: &mut UiState, browser: &BrowserState) -> Option<Msg> {
    // Ctrl+C always quits, even while typing
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Msg::Quit);
    }

    match ui.input_mode {
        InputMode::Omnibox => handle_omnibox(key, ui),
        InputMode::Copilot => handle_copilot_input(key, ui),
        InputMode::Normal => handle_normal(key, ui, browser),
    }
}

fn handle_omnibox(key: KeyEvent, ui: &mut UiState) -> Option<Msg> {
    match key.code {
        KeyCode::Enter => {
            ui.input_mode = InputMode::Normal;
            ui.page_changed();
            Some(Msg::Navigate(std::mem::take(&mut ui.omnibox)))
        }
        KeyCode::Esc => {
            ui.input_mode = InputMode::Normal;
            None
        }
        KeyCode::Backspace => {
            ui.omnibox.pop();
            None
        }
        KeyCode::Char(c) => {
            ui.omnibox.push(c);
            None
        }
        _ => None,
    }
}

fn handle_copilot_input(key: KeyEvent, ui: &mut UiState) -> Option<Msg> {
    match key.code {
        KeyCode::Enter => Some(Msg::CopilotSend(std::mem::take(&mut ui.copilot_input))),
        KeyCode::Esc => {
            ui.input_mode = InputMode::Normal;
            None
        }
        KeyCode::Backspace => {
            ui.copilot_input.pop();
            None
        }
        KeyCode::Char(c) => {
            ui.copilot_input.push(c);
            None
        }
        _ => None,
    }
}

fn handle_normal(key: KeyEvent, ui: &mut UiState, browser: &BrowserState) -> Option<Msg> {
    let focus = ui.focus(browser);

    // Global keybindings
    match key.code {
        KeyCode::Char('q') => return Some(Msg::Quit),
        KeyCode::Char('?') | KeyCode::F(1) => {
            ui.show_help = !ui.show_help;
            return None;
        }
        KeyCode::Esc => return close_topmost(ui, browser),
        KeyCode::Up | KeyCode::Char('k') => {
            ui.move_cursor(browser, -1);
            return None;
        }
        KeyCode::Down | KeyCode::Char('j') => {
            ui.move_cursor(browser, 1);
            return None;
        }
        KeyCode::PageUp => {
            ui.scroll = ui.scroll.saturating_sub(10);
            return None;
        }
        KeyCode::PageDown => {
            ui.scroll = ui.scroll.saturating_add(10);
            return None;
        }
        KeyCode::Tab => {
            ui.cycle_side_focus(browser);
            return None;
        }
        KeyCode::Enter => return select(focus, ui, browser),
        _ => {}
    }

    // Focus-specific keybindings
    match (focus, key.code) {
        (Focus::Grid, KeyCode::Char('x')) => {
            let tab = browser.tabs.tabs().get(ui.grid_cursor)?;
            ui.grid_cursor = ui.grid_cursor.min(browser.tabs.len().saturating_sub(2));
            return Some(Msg::CloseTab(tab.id.clone()));
        }
        (Focus::Customize, KeyCode::Char(' ')) => return select(focus, ui, browser),
        (Focus::Copilot, KeyCode::Char('i')) => {
            ui.input_mode = InputMode::Copilot;
            return None;
        }
        _ => {}
    }

    let alt = key.modifiers.contains(KeyModifiers::ALT);
    match key.code {
        KeyCode::Char('/') | KeyCode::Char('o') => {
            ui.focus_omnibox(browser);
            None
        }
        KeyCode::Char('b') => page_msg(ui, Msg::Back),
        KeyCode::Left if alt => page_msg(ui, Msg::Back),
        KeyCode::Char('f') => page_msg(ui, Msg::Forward),
        KeyCode::Right if alt => page_msg(ui, Msg::Forward),
        KeyCode::Char('r') => Some(Msg::Refresh),
        KeyCode::Char('t') => page_msg(ui, Msg::NewTab),
        KeyCode::Char('w') => page_msg(ui, Msg::CloseActiveTab),
        KeyCode::Char(']') => page_msg(ui, Msg::CycleTab(1)),
        KeyCode::Char('[') => page_msg(ui, Msg::CycleTab(-1)),
        KeyCode::Char('g') => {
            ui.grid_cursor = browser.tabs.active_position();
            Some(Msg::ToggleViewMode)
        }
        KeyCode::Char('h') => {
            ui.history_cursor = 0;
            Some(Msg::ToggleHistory)
        }
        KeyCode::Char('c') => Some(Msg::ToggleCopilot),
        KeyCode::Char('i') => {
            ui.input_mode = InputMode::Copilot;
            ui.side_focus = Some(Focus::Copilot);
            (!browser.copilot_open).then_some(Msg::ToggleCopilot)
        }
        KeyCode::Char('T') => {
            ui.theme_cursor = 0;
            Some(Msg::ToggleThemeStore)
        }
        KeyCode::Char('G') => Some(Msg::ToggleGhost),
        KeyCode::Char('R') => Some(Msg::ToggleReader),
        KeyCode::Char('s') => Some(Msg::Summarize),
        KeyCode::Char('d') => deep_dive_target(browser).map(Msg::DeepDive),
        KeyCode::Char('v') => Some(Msg::StartListening),
        KeyCode::Char('C') => {
            ui.widget_cursor = 0;
            Some(Msg::ToggleCustomize)
        }
        _ => None,
    }
}

/// Messages that change the visible page also reset scroll and cursor
fn page_msg(ui: &mut UiState, msg: Msg) -> Option<Msg> {
    ui.page_changed();
    Some(msg)
}

/// Query a deep dive would research from the current page
fn deep_dive_target(browser: &BrowserState) -> Option<String> {
    let page = browser.active_page();
    match page.kind {
        PageKind::SearchResult | PageKind::DeepDive => page.query.clone(),
        _ => None,
    }
}

/// Esc closes the topmost overlay, one per press
fn close_topmost(ui: &mut UiState, browser: &BrowserState) -> Option<Msg> {
    if ui.show_help {
        ui.show_help = false;
        None
    } else if browser.theme_store_open {
        Some(Msg::ToggleThemeStore)
    } else if browser.visible_summary().is_some() {
        Some(Msg::CloseSummary)
    } else if browser.reader_mode {
        Some(Msg::ToggleReader)
    } else if browser.customizing {
        Some(Msg::ToggleCustomize)
    } else if browser.status_message.is_some() {
        Some(Msg::DismissStatus)
    } else {
        None
    }
}

fn select(focus: Focus, ui: &mut UiState, browser: &BrowserState) -> Option<Msg> {
    match focus {
        Focus::Content => match content_items(browser).into_iter().nth(ui.content_cursor)? {
            ContentItem::Query(query) => {
                ui.page_changed();
                Some(Msg::Navigate(query))
            }
            ContentItem::Recents => {
                ui.side_focus = Some(Focus::History);
                (!browser.history_open).then_some(Msg::ToggleHistory)
            }
        },
        Focus::History => {
            let len = browser.tabs.active().history().len();
            let index = history_row_to_index(ui.history_cursor, len)?;
            ui.page_changed();
            Some(Msg::JumpTo(index))
        }
        Focus::Grid => {
            let tab = browser.tabs.tabs().get(ui.grid_cursor)?;
            ui.page_changed();
            Some(Msg::SwitchTab(tab.id.clone()))
        }
        Focus::ThemeStore => {
            let theme = available_themes().into_iter().nth(ui.theme_cursor)?;
            Some(Msg::SelectTheme(theme.id))
        }
        Focus::Customize => {
            let widget = browser.dashboard.widgets().get(ui.widget_cursor)?;
            Some(Msg::ToggleWidget(widget.id.clone()))
        }
        Focus::Copilot => {
            ui.input_mode = InputMode::Copilot;
            None
        }
    }
}

/// Poll for keyboard events with timeout
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<KeyEvent>> {
    if event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(Some(key));
            }
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{update, ViewMode};
    use crate::tab::TabId;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(ui: &mut UiState, browser: &BrowserState, text: &str) {
        for c in text.chars() {
            assert!(handle_key_event(press(KeyCode::Char(c)), ui, browser).is_none());
        }
    }

    #[test]
    fn test_quit_action() {
        let browser = BrowserState::default();
        let mut ui = UiState::default();
        assert_eq!(
            handle_key_event(press(KeyCode::Char('q')), &mut ui, &browser),
            Some(Msg::Quit)
        );
    }

    #[test]
    fn test_ctrl_c_quits_while_typing() {
        let browser = BrowserState::default();
        let mut ui = UiState {
            input_mode: InputMode::Omnibox,
            ..Default::default()
        };
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(key, &mut ui, &browser), Some(Msg::Quit));
    }

    #[test]
    fn test_omnibox_typing_navigates() {
        let browser = BrowserState::default();
        let mut ui = UiState::default();

        handle_key_event(press(KeyCode::Char('/')), &mut ui, &browser);
        assert_eq!(ui.input_mode, InputMode::Omnibox);

        // 'q' is text here, not quit
        type_text(&mut ui, &browser, "qrust");
        handle_key_event(press(KeyCode::Backspace), &mut ui, &browser);

        let msg = handle_key_event(press(KeyCode::Enter), &mut ui, &browser);
        assert_eq!(msg, Some(Msg::Navigate("qrus".into())));
        assert_eq!(ui.input_mode, InputMode::Normal);
        assert!(ui.omnibox.is_empty());
    }

    #[test]
    fn test_enter_on_dashboard_opens_shortcut() {
        let browser = BrowserState::default();
        let mut ui = UiState::default();

        handle_key_event(press(KeyCode::Down), &mut ui, &browser);
        let msg = handle_key_event(press(KeyCode::Enter), &mut ui, &browser);
        assert_eq!(
            msg,
            Some(Msg::Navigate("What is trending worldwide today?".into()))
        );
    }

    #[test]
    fn test_recents_shortcut_opens_history() {
        let mut browser = BrowserState::default();
        let mut ui = UiState::default();

        for _ in 0..3 {
            handle_key_event(press(KeyCode::Down), &mut ui, &browser);
        }
        let msg = handle_key_event(press(KeyCode::Enter), &mut ui, &browser);
        assert_eq!(msg, Some(Msg::ToggleHistory));
        assert_eq!(ui.side_focus, Some(Focus::History));

        // Already open: focus moves there without closing it
        update(&mut browser, Msg::ToggleHistory);
        ui.side_focus = None;
        let msg = handle_key_event(press(KeyCode::Enter), &mut ui, &browser);
        assert_eq!(msg, None);
        assert_eq!(ui.side_focus, Some(Focus::History));
    }

    #[test]
    fn test_grid_select_switches_tab() {
        let mut browser = BrowserState::default();
        update(&mut browser, Msg::NewTab);
        update(&mut browser, Msg::ToggleViewMode);
        assert_eq!(browser.view_mode, ViewMode::Grid);

        let mut ui = UiState::default();
        let msg = handle_key_event(press(KeyCode::Enter), &mut ui, &browser);
        assert_eq!(msg, Some(Msg::SwitchTab(TabId::new("tab-1"))));
    }

    #[test]
    fn test_theme_store_select() {
        let mut browser = BrowserState::default();
        update(&mut browser, Msg::ToggleThemeStore);

        let mut ui = UiState::default();
        handle_key_event(press(KeyCode::Down), &mut ui, &browser);
        let msg = handle_key_event(press(KeyCode::Enter), &mut ui, &browser);
        assert_eq!(msg, Some(Msg::SelectTheme("midnight-blue".into())));
    }

    #[test]
    fn test_deep_dive_needs_result_page() {
        let browser = BrowserState::default();
        let mut ui = UiState::default();
        assert!(handle_key_event(press(KeyCode::Char('d')), &mut ui, &browser).is_none());
    }

    #[test]
    fn test_escape_closes_theme_store_first() {
        let mut browser = BrowserState::default();
        update(&mut browser, Msg::ToggleThemeStore);
        browser.status_message = Some("x".into());

        let mut ui = UiState::default();
        let msg = handle_key_event(press(KeyCode::Esc), &mut ui, &browser);
        assert_eq!(msg, Some(Msg::ToggleThemeStore));
    }

    #[test]
    fn test_copilot_input() {
        let browser = BrowserState::default();
        let mut ui = UiState::default();

        let msg = handle_key_event(press(KeyCode::Char('i')), &mut ui, &browser);
        assert_eq!(msg, Some(Msg::ToggleCopilot));
        assert_eq!(ui.input_mode, InputMode::Copilot);

        type_text(&mut ui, &browser, "why?");
        let msg = handle_key_event(press(KeyCode::Enter), &mut ui, &browser);
        assert_eq!(msg, Some(Msg::CopilotSend("why?".into())));
    }
}
