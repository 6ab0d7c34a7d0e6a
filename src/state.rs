//! Browser state - the single state tree and its reducer
//!
//! `update()` takes the current state and a message, mutates the state, and
//! returns a [`Command`] describing the side effects the runtime should
//! execute. This module performs no I/O.

use tracing::{debug, info, warn};

use crate::copilot::{ChatMessage, Conversation};
use crate::dispatcher::{deep_dive_url, route, Completion, NavigationRequest, RequestKind, Route, Ticket};
use crate::page::{PageContent, PageKind, INTERNAL_SCHEME};
use crate::tab::{TabId, TabRegistry, TabStatus};
use crate::theme::{find_theme, ThemeState};
use crate::widget::Dashboard;

/// Copilot context used when the current page has no body
pub const NO_PAGE_CONTEXT: &str = "User is on a new tab or dashboard.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Browser,
    Grid,
}

/// Bullet-point summary shown over a result page
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryOverlay {
    pub ticket: Ticket,
    /// `None` while the summary is being generated
    pub text: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Messages and commands
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    // Navigation
    Navigate(String),
    DeepDive(String),
    Back,
    Forward,
    JumpTo(usize),
    Refresh,

    // Tabs
    NewTab,
    CloseTab(TabId),
    CloseActiveTab,
    SwitchTab(TabId),
    CycleTab(isize),
    ToggleViewMode,

    // Dashboard + themes
    ToggleCustomize,
    ToggleWidget(String),
    SelectTheme(String),
    ToggleGhost,

    // Panels
    ToggleHistory,
    ToggleCopilot,
    ToggleThemeStore,
    ToggleReader,
    Summarize,
    CloseSummary,
    CopilotSend(String),
    StartListening,
    DismissStatus,
    Quit,

    // Completions from the dispatcher
    PageLoaded(Completion),
    SummaryLoaded { ticket: Ticket, text: String },
    CopilotReplied(String),
    Transcript(String),
    SpeechFailed(String),
}

/// Side effects requested by [`update`]
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    None,
    Quit,
    Fetch(NavigationRequest),
    Summarize { ticket: Ticket, text: String },
    AskCopilot { history: Vec<ChatMessage>, context: String },
    Listen,
}

// ─────────────────────────────────────────────────────────────────────────────
// State
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct BrowserState {
    pub tabs: TabRegistry,
    pub view_mode: ViewMode,
    pub theme: ThemeState,
    pub dashboard: Dashboard,
    pub copilot: Conversation,

    pub history_open: bool,
    pub copilot_open: bool,
    pub theme_store_open: bool,
    pub reader_mode: bool,
    pub customizing: bool,
    pub listening: bool,
    pub summary: Option<SummaryOverlay>,

    /// One-line notice shown in the footer
    pub status_message: Option<String>,
    pub should_quit: bool,
}

impl BrowserState {
    pub fn new(theme: ThemeState) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    pub fn active_page(&self) -> &PageContent {
        self.tabs.active().current()
    }

    fn active_ticket(&self) -> Ticket {
        let tab = self.tabs.active();
        Ticket::new(tab.id.clone(), tab.generation())
    }

    /// Whether a ticket still matches its tab's current generation
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        state_accepts(&self.tabs, ticket)
    }

    /// Summary overlay for the page currently on screen, if any
    pub fn visible_summary(&self) -> Option<&SummaryOverlay> {
        self.summary
            .as_ref()
            .filter(|s| s.ticket == self.active_ticket())
    }

    /// Page text handed to the copilot as context
    pub fn copilot_context(&self) -> String {
        let page = self.active_page();
        match page.kind {
            PageKind::SearchResult | PageKind::DeepDive if !page.body().is_empty() => {
                page.body().to_string()
            }
            _ => NO_PAGE_CONTEXT.to_string(),
        }
    }

    /// Per-page view state goes away whenever the visible page changes
    fn leave_page(&mut self) {
        self.reader_mode = false;
        self.summary = None;
    }

    fn notify(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Reducer
// ─────────────────────────────────────────────────────────────────────────────

/// Apply a message to the state and return the next command for the runtime.
///
/// Every state transition goes through this function.
pub fn update(state: &mut BrowserState, msg: Msg) -> Command {
    match msg {
        Msg::Navigate(input) => navigate(state, &input),

        Msg::DeepDive(query) => {
            let query = query.trim().to_string();
            if query.is_empty() {
                return Command::None;
            }
            state.leave_page();
            let tab = state.tabs.active_mut();
            let generation = tab.begin_request(None, format!("Researching: {}", query));
            Command::Fetch(NavigationRequest {
                ticket: Ticket::new(tab.id.clone(), generation),
                kind: RequestKind::DeepDive,
                query,
            })
        }

        Msg::Back => {
            if state.tabs.active_mut().go_back() {
                state.leave_page();
            }
            Command::None
        }

        Msg::Forward => {
            if state.tabs.active_mut().go_forward() {
                state.leave_page();
            }
            Command::None
        }

        Msg::JumpTo(index) => {
            match state.tabs.active_mut().jump_to(index) {
                Ok(()) => state.leave_page(),
                Err(e) => {
                    warn!(index, error = %e, "Rejected history jump");
                    state.notify(e.to_string());
                }
            }
            Command::None
        }

        Msg::Refresh => {
            let url = state.tabs.active().url.clone();
            if url.starts_with(INTERNAL_SCHEME) {
                return Command::None;
            }
            navigate(state, &url)
        }

        Msg::NewTab => {
            let id = state.tabs.create();
            debug!(tab = %id, "Opened tab");
            state.view_mode = ViewMode::Browser;
            state.leave_page();
            Command::None
        }

        Msg::CloseTab(id) => {
            close_tab(state, &id);
            Command::None
        }

        Msg::CloseActiveTab => {
            let id = state.tabs.active_id().clone();
            close_tab(state, &id);
            Command::None
        }

        Msg::SwitchTab(id) => {
            switch_tab(state, &id);
            Command::None
        }

        Msg::CycleTab(offset) => {
            let id = state.tabs.cycle(offset);
            switch_tab(state, &id);
            Command::None
        }

        Msg::ToggleViewMode => {
            state.view_mode = match state.view_mode {
                ViewMode::Browser => ViewMode::Grid,
                ViewMode::Grid => ViewMode::Browser,
            };
            Command::None
        }

        Msg::ToggleCustomize => {
            state.customizing = !state.customizing;
            Command::None
        }

        Msg::ToggleWidget(id) => {
            if let Err(e) = state.dashboard.toggle(&id) {
                state.notify(e.to_string());
            }
            Command::None
        }

        Msg::SelectTheme(id) => {
            if state.theme.is_ghost() {
                state.notify("Themes are locked while Ghost mode is on");
                return Command::None;
            }
            match find_theme(&id) {
                Ok(theme) => {
                    state.theme.select(theme);
                }
                Err(e) => state.notify(e.to_string()),
            }
            Command::None
        }

        Msg::ToggleGhost => {
            state.theme.toggle_ghost();
            if state.theme.is_ghost() {
                state.theme_store_open = false;
            }
            Command::None
        }

        Msg::ToggleHistory => {
            state.history_open = !state.history_open;
            Command::None
        }

        Msg::ToggleCopilot => {
            state.copilot_open = !state.copilot_open;
            Command::None
        }

        Msg::ToggleThemeStore => {
            if state.theme.is_ghost() {
                state.notify("Themes are locked while Ghost mode is on");
            } else {
                state.theme_store_open = !state.theme_store_open;
            }
            Command::None
        }

        Msg::ToggleReader => {
            if state.active_page().is_result() && state.active_page().kind != PageKind::Error {
                state.reader_mode = !state.reader_mode;
            }
            Command::None
        }

        Msg::Summarize => {
            let page = state.active_page();
            let text = match page.kind {
                PageKind::SearchResult | PageKind::DeepDive if !page.body().is_empty() => {
                    page.body().to_string()
                }
                _ => return Command::None,
            };
            if state.visible_summary().is_some() {
                return Command::None;
            }
            let ticket = state.active_ticket();
            state.summary = Some(SummaryOverlay {
                ticket: ticket.clone(),
                text: None,
            });
            Command::Summarize { ticket, text }
        }

        Msg::CloseSummary => {
            state.summary = None;
            Command::None
        }

        Msg::CopilotSend(text) => {
            let context = state.copilot_context();
            match state.copilot.ask(&text) {
                Some(history) => {
                    state.copilot_open = true;
                    Command::AskCopilot { history, context }
                }
                None => Command::None,
            }
        }

        Msg::StartListening => {
            if state.listening {
                return Command::None;
            }
            state.listening = true;
            Command::Listen
        }

        Msg::DismissStatus => {
            state.status_message = None;
            Command::None
        }

        Msg::Quit => {
            state.should_quit = true;
            Command::Quit
        }

        Msg::PageLoaded(completion) => {
            apply_completion(state, completion);
            Command::None
        }

        Msg::SummaryLoaded { ticket, text } => {
            let pending = state
                .summary
                .as_mut()
                .filter(|s| s.ticket == ticket && s.text.is_none());
            match pending {
                Some(overlay) if state_accepts(&state.tabs, &ticket) => overlay.text = Some(text),
                _ => debug!(tab = %ticket.tab_id, "Dropping stale summary"),
            }
            Command::None
        }

        Msg::CopilotReplied(text) => {
            state.copilot.receive(text);
            Command::None
        }

        Msg::Transcript(transcript) => {
            state.listening = false;
            navigate(state, &transcript)
        }

        Msg::SpeechFailed(message) => {
            state.listening = false;
            state.notify(message);
            Command::None
        }
    }
}

fn state_accepts(tabs: &TabRegistry, ticket: &Ticket) -> bool {
    tabs.get(&ticket.tab_id)
        .is_some_and(|tab| tab.accepts(ticket.generation))
}

fn navigate(state: &mut BrowserState, input: &str) -> Command {
    match route(input) {
        Route::Ignore => Command::None,
        Route::NewTab => {
            state.view_mode = ViewMode::Browser;
            state.leave_page();
            let tab = state.tabs.active_mut();
            let page = PageContent::new_tab();
            let (url, title) = (page.display_url().to_string(), page.display_title().to_string());
            tab.commit(page, url, title, TabStatus::Idle);
            Command::None
        }
        Route::Internal(url) => {
            state.notify(format!("{} is not a page that can be opened", url));
            Command::None
        }
        Route::Search(query) => {
            state.view_mode = ViewMode::Browser;
            state.leave_page();
            let tab = state.tabs.active_mut();
            let generation = tab.begin_request(Some(&query), query.clone());
            Command::Fetch(NavigationRequest {
                ticket: Ticket::new(tab.id.clone(), generation),
                kind: RequestKind::Search,
                query,
            })
        }
    }
}

fn close_tab(state: &mut BrowserState, id: &TabId) {
    let was_active = state.tabs.active_id() == id;
    if state.tabs.close(id) {
        debug!(tab = %id, "Closed tab");
        if was_active {
            state.leave_page();
        }
    }
}

fn switch_tab(state: &mut BrowserState, id: &TabId) {
    match state.tabs.switch_to(id) {
        Ok(()) => {
            state.view_mode = ViewMode::Browser;
            state.leave_page();
        }
        Err(e) => state.notify(e.to_string()),
    }
}

fn apply_completion(state: &mut BrowserState, completion: Completion) {
    let Completion { request, outcome } = completion;
    let NavigationRequest {
        ticket,
        kind,
        query,
    } = request;

    let Some(tab) = state.tabs.get_mut(&ticket.tab_id) else {
        debug!(tab = %ticket.tab_id, "Dropping completion for closed tab");
        return;
    };
    if !tab.accepts(ticket.generation) {
        debug!(
            tab = %ticket.tab_id,
            issued = ticket.generation,
            current = tab.generation(),
            "Dropping stale completion"
        );
        return;
    }

    let status = if outcome.is_ok() {
        TabStatus::Complete
    } else {
        TabStatus::Error
    };

    match (kind, outcome) {
        (RequestKind::Search, Ok(answer)) => {
            tab.commit(PageContent::search_result(&query, answer), &query, &query, status);
        }
        (RequestKind::DeepDive, Ok(answer)) => {
            let url = deep_dive_url(&query);
            let title = format!("Deep Research: {}", query);
            tab.commit(PageContent::deep_dive(&query, answer), url, title, status);
        }
        (RequestKind::Search, Err(message)) => {
            warn!(tab = %ticket.tab_id, error = %message, "Search failed");
            tab.commit(PageContent::error(&query, message), &query, &query, status);
        }
        (RequestKind::DeepDive, Err(message)) => {
            warn!(tab = %ticket.tab_id, error = %message, "Deep research failed");
            let url = deep_dive_url(&query);
            let title = format!("Deep Research: {}", query);
            tab.commit(PageContent::error(&query, message), url, title, status);
        }
    }

    info!(tab = %ticket.tab_id, status = %status, "Page loaded");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{Answer, NEW_TAB_URL};
    use crate::theme::GHOST_THEME_ID;
    use pretty_assertions::assert_eq;

    fn answer(summary: &str) -> Answer {
        Answer {
            summary: summary.to_string(),
            related_topics: vec!["next".to_string()],
            ..Default::default()
        }
    }

    fn fetch(cmd: Command) -> NavigationRequest {
        match cmd {
            Command::Fetch(request) => request,
            other => panic!("expected fetch, got {:?}", other),
        }
    }

    fn complete(state: &mut BrowserState, request: NavigationRequest, outcome: Result<Answer, String>) {
        update(state, Msg::PageLoaded(Completion { request, outcome }));
    }

    #[test]
    fn test_navigate_sets_loading_and_fetches() {
        let mut state = BrowserState::default();
        state.view_mode = ViewMode::Grid;

        let request = fetch(update(&mut state, Msg::Navigate("  rust  ".into())));
        let tab = state.tabs.active();

        assert_eq!(request.query, "rust");
        assert_eq!(request.kind, RequestKind::Search);
        assert_eq!(tab.status, TabStatus::Loading);
        assert_eq!(tab.url, "rust");
        assert_eq!(tab.title, "rust");
        assert_eq!(state.view_mode, ViewMode::Browser);
    }

    #[test]
    fn test_blank_navigation_ignored() {
        let mut state = BrowserState::default();
        assert_eq!(update(&mut state, Msg::Navigate("   ".into())), Command::None);
        assert_eq!(state.tabs.active().status, TabStatus::Idle);
    }

    #[test]
    fn test_newtab_url_is_local() {
        let mut state = BrowserState::default();
        let request = fetch(update(&mut state, Msg::Navigate("rust".into())));
        complete(&mut state, request, Ok(answer("body")));

        assert_eq!(update(&mut state, Msg::Navigate(NEW_TAB_URL.into())), Command::None);
        let tab = state.tabs.active();
        assert_eq!(tab.history().len(), 3);
        assert_eq!(tab.current().kind, PageKind::NewTab);
        assert_eq!(tab.url, NEW_TAB_URL);
    }

    #[test]
    fn test_search_completion_appends_entry() {
        let mut state = BrowserState::default();
        let request = fetch(update(&mut state, Msg::Navigate("rust".into())));
        complete(&mut state, request, Ok(answer("Rust is a language")));

        let tab = state.tabs.active();
        assert_eq!(tab.status, TabStatus::Complete);
        assert_eq!(tab.history().len(), 2);
        assert_eq!(tab.history().index(), 1);
        assert_eq!(tab.current().kind, PageKind::SearchResult);
        assert_eq!(tab.current().body(), "Rust is a language");
        assert_eq!(tab.current().topics(), ["next".to_string()]);
    }

    #[test]
    fn test_search_failure_creates_error_page() {
        let mut state = BrowserState::default();
        let request = fetch(update(&mut state, Msg::Navigate("rust".into())));
        complete(&mut state, request, Err("quota exceeded".into()));

        let tab = state.tabs.active();
        assert_eq!(tab.status, TabStatus::Error);
        assert_eq!(tab.current().kind, PageKind::Error);
        assert_eq!(tab.current().error.as_deref(), Some("quota exceeded"));
        assert_eq!(tab.url, "rust");
    }

    #[test]
    fn test_deep_dive_titles_and_url() {
        let mut state = BrowserState::default();
        let request = fetch(update(&mut state, Msg::DeepDive("quantum computing".into())));
        assert_eq!(state.tabs.active().title, "Researching: quantum computing");
        assert_eq!(state.tabs.active().url, NEW_TAB_URL);

        complete(&mut state, request, Ok(answer("report")));
        let tab = state.tabs.active();
        assert_eq!(tab.url, "brow://deep-dive/quantum%20computing");
        assert_eq!(tab.title, "Deep Research: quantum computing");
        assert_eq!(tab.status, TabStatus::Complete);
        assert_eq!(tab.current().kind, PageKind::DeepDive);
    }

    #[test]
    fn test_superseded_completion_is_dropped() {
        let mut state = BrowserState::default();
        let first = fetch(update(&mut state, Msg::Navigate("first".into())));
        let second = fetch(update(&mut state, Msg::Navigate("second".into())));

        complete(&mut state, first, Ok(answer("old")));
        assert_eq!(state.tabs.active().history().len(), 1);
        assert_eq!(state.tabs.active().status, TabStatus::Loading);

        complete(&mut state, second, Ok(answer("new")));
        assert_eq!(state.tabs.active().history().len(), 2);
        assert_eq!(state.tabs.active().current().body(), "new");
    }

    #[test]
    fn test_completion_after_back_is_dropped() {
        let mut state = BrowserState::default();
        let a = fetch(update(&mut state, Msg::Navigate("a".into())));
        complete(&mut state, a, Ok(answer("a")));

        let b = fetch(update(&mut state, Msg::Navigate("b".into())));
        update(&mut state, Msg::Back);
        complete(&mut state, b, Ok(answer("b")));

        let tab = state.tabs.active();
        assert_eq!(tab.history().len(), 2);
        assert_eq!(tab.history().index(), 0);
    }

    #[test]
    fn test_completion_for_closed_tab_is_dropped() {
        let mut state = BrowserState::default();
        update(&mut state, Msg::NewTab);
        let closing = state.tabs.active_id().clone();
        let request = fetch(update(&mut state, Msg::Navigate("x".into())));

        update(&mut state, Msg::CloseTab(closing.clone()));
        complete(&mut state, request, Ok(answer("x")));

        assert!(state.tabs.get(&closing).is_none());
        assert_eq!(state.tabs.len(), 1);
        assert_eq!(state.tabs.active().history().len(), 1);
    }

    #[test]
    fn test_completion_lands_in_background_tab() {
        let mut state = BrowserState::default();
        let first = state.tabs.active_id().clone();
        let request = fetch(update(&mut state, Msg::Navigate("bg".into())));

        update(&mut state, Msg::NewTab);
        complete(&mut state, request, Ok(answer("bg")));

        assert_eq!(state.tabs.get(&first).unwrap().history().len(), 2);
        assert_eq!(state.tabs.active().history().len(), 1);
    }

    #[test]
    fn test_back_then_navigate_truncates() {
        let mut state = BrowserState::default();
        for q in ["a", "b"] {
            let request = fetch(update(&mut state, Msg::Navigate(q.into())));
            complete(&mut state, request, Ok(answer(q)));
        }
        update(&mut state, Msg::Back);
        let request = fetch(update(&mut state, Msg::Navigate("c".into())));
        complete(&mut state, request, Ok(answer("c")));

        let queries: Vec<_> = state
            .tabs
            .active()
            .history()
            .entries()
            .iter()
            .map(|p| p.display_url().to_string())
            .collect();
        assert_eq!(queries, vec![NEW_TAB_URL, "a", "c"]);
    }

    #[test]
    fn test_jump_out_of_range_is_rejected() {
        let mut state = BrowserState::default();
        update(&mut state, Msg::JumpTo(5));
        assert_eq!(state.tabs.active().history().index(), 0);
        assert!(state.status_message.is_some());
    }

    #[test]
    fn test_refresh_skips_internal_urls() {
        let mut state = BrowserState::default();
        assert_eq!(update(&mut state, Msg::Refresh), Command::None);

        let request = fetch(update(&mut state, Msg::Navigate("rust".into())));
        complete(&mut state, request, Ok(answer("r")));
        let again = fetch(update(&mut state, Msg::Refresh));
        assert_eq!(again.query, "rust");
    }

    #[test]
    fn test_new_and_switch_tab_return_to_browser() {
        let mut state = BrowserState::default();
        let first = state.tabs.active_id().clone();

        update(&mut state, Msg::ToggleViewMode);
        assert_eq!(state.view_mode, ViewMode::Grid);
        update(&mut state, Msg::NewTab);
        assert_eq!(state.view_mode, ViewMode::Browser);

        update(&mut state, Msg::ToggleViewMode);
        update(&mut state, Msg::SwitchTab(first.clone()));
        assert_eq!(state.view_mode, ViewMode::Browser);
        assert_eq!(state.tabs.active_id(), &first);
    }

    #[test]
    fn test_theme_select_and_ghost_roundtrip() {
        let mut state = BrowserState::default();
        update(&mut state, Msg::SelectTheme("cyberpunk".into()));
        assert_eq!(state.theme.active().id, "cyberpunk");

        update(&mut state, Msg::ToggleGhost);
        assert_eq!(state.theme.active().id, GHOST_THEME_ID);

        update(&mut state, Msg::SelectTheme("forest-depths".into()));
        assert_eq!(state.theme.active().id, GHOST_THEME_ID);

        update(&mut state, Msg::ToggleGhost);
        assert_eq!(state.theme.active().id, "cyberpunk");
    }

    #[test]
    fn test_unknown_theme_reports() {
        let mut state = BrowserState::default();
        update(&mut state, Msg::SelectTheme("neon".into()));
        assert_eq!(state.theme.active().id, "default-dark");
        assert!(state.status_message.unwrap().contains("neon"));
    }

    #[test]
    fn test_toggle_widget() {
        let mut state = BrowserState::default();
        update(&mut state, Msg::ToggleWidget("w3".into()));
        assert!(state.dashboard.widgets()[2].enabled);
    }

    #[test]
    fn test_summary_applies_only_to_same_page() {
        let mut state = BrowserState::default();
        let request = fetch(update(&mut state, Msg::Navigate("rust".into())));
        complete(&mut state, request, Ok(answer("long body")));

        let ticket = match update(&mut state, Msg::Summarize) {
            Command::Summarize { ticket, text } => {
                assert_eq!(text, "long body");
                ticket
            }
            other => panic!("expected summarize, got {:?}", other),
        };
        assert!(state.visible_summary().unwrap().text.is_none());

        update(
            &mut state,
            Msg::SummaryLoaded {
                ticket: ticket.clone(),
                text: "- point".into(),
            },
        );
        assert_eq!(
            state.visible_summary().unwrap().text.as_deref(),
            Some("- point")
        );

        // Navigating away invalidates any late summary
        update(&mut state, Msg::Back);
        assert!(state.visible_summary().is_none());
        update(
            &mut state,
            Msg::SummaryLoaded {
                ticket,
                text: "late".into(),
            },
        );
        assert!(state.summary.is_none());
    }

    #[test]
    fn test_summarize_needs_result_page() {
        let mut state = BrowserState::default();
        assert_eq!(update(&mut state, Msg::Summarize), Command::None);
    }

    #[test]
    fn test_copilot_send_uses_page_context() {
        let mut state = BrowserState::default();
        match update(&mut state, Msg::CopilotSend("hello".into())) {
            Command::AskCopilot { history, context } => {
                assert_eq!(history.len(), 2);
                assert_eq!(context, NO_PAGE_CONTEXT);
            }
            other => panic!("expected copilot, got {:?}", other),
        }
        assert!(state.copilot.is_thinking());

        update(&mut state, Msg::CopilotReplied("hi!".into()));
        assert!(!state.copilot.is_thinking());
        assert_eq!(state.copilot.messages().len(), 3);
    }

    #[test]
    fn test_transcript_navigates() {
        let mut state = BrowserState::default();
        assert_eq!(update(&mut state, Msg::StartListening), Command::Listen);
        assert!(state.listening);

        let request = fetch(update(&mut state, Msg::Transcript("weather".into())));
        assert_eq!(request.query, "weather");
        assert!(!state.listening);
    }

    #[test]
    fn test_speech_failure_is_not_fatal() {
        let mut state = BrowserState::default();
        update(&mut state, Msg::StartListening);
        update(&mut state, Msg::SpeechFailed("Voice search is not supported".into()));
        assert!(!state.listening);
        assert!(!state.should_quit);
        assert_eq!(
            state.status_message.as_deref(),
            Some("Voice search is not supported")
        );
    }

    #[test]
    fn test_close_last_tab_resets() {
        let mut state = BrowserState::default();
        let request = fetch(update(&mut state, Msg::Navigate("a".into())));
        complete(&mut state, request, Ok(answer("a")));

        update(&mut state, Msg::CloseActiveTab);
        let tab = state.tabs.active();
        assert_eq!(tab.history().len(), 1);
        assert_eq!(tab.current().kind, PageKind::NewTab);
    }

    #[test]
    fn test_quit() {
        let mut state = BrowserState::default();
        assert_eq!(update(&mut state, Msg::Quit), Command::Quit);
        assert!(state.should_quit);
    }
}
