//! TUI Application - Main entry point and run loop

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::events::{handle_key_event, poll_event};
use super::state::{Focus, InputMode, UiState};
use super::theme::{hex_color, icons, TerminalTheme};
use super::widgets::{render_markdown, utils, LoadingBanner, MarkdownView, Spinner, TabStrip};
use crate::copilot::ChatRole;
use crate::dispatcher::Dispatcher;
use crate::page::{PageContent, PageKind};
use crate::provider::Provider;
use crate::speech::SpeechCapability;
use crate::state::{update, BrowserState, Msg, ViewMode};
use crate::tab::TabStatus;
use crate::theme::available_themes;
use crate::widget::{WidgetType, NEWS_HEADLINES, SHORTCUTS};

/// Brand shown on the New-Tab dashboard
const BRAND: &str = "Brow";
const TAGLINE: &str = "The Generative Web Experience";
const WEATHER_CARD: (&str, &str) = ("72°F", "San Francisco, CA");

/// Poll interval of the UI loop
const TICK_RATE: Duration = Duration::from_millis(33);

/// TUI Application
pub struct TuiApp {
    browser: BrowserState,
    ui: UiState,
    dispatcher: Dispatcher,
    rx: mpsc::UnboundedReceiver<Msg>,
    provider_label: String,
}

impl TuiApp {
    pub fn new(browser: BrowserState, provider: Arc<dyn Provider>, speech: SpeechCapability) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let provider_label = format!("{}:{}", provider.name(), provider.default_model());
        Self {
            browser,
            ui: UiState::default(),
            dispatcher: Dispatcher::new(provider, speech, tx),
            rx,
            provider_label,
        }
    }

    /// Run the TUI application
    pub async fn run(mut self) -> anyhow::Result<()> {
        let mut terminal = self.setup_terminal()?;
        info!(provider = %self.provider_label, "Browser started");

        let result = self.main_loop(&mut terminal).await;

        self.restore_terminal(&mut terminal)?;
        result
    }

    fn setup_terminal(&self) -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    fn restore_terminal(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> anyhow::Result<()> {
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }

    async fn main_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            self.ui.tick();

            terminal.draw(|frame| self.render(frame))?;

            // Completions from spawned requests
            while let Ok(msg) = self.rx.try_recv() {
                self.apply(msg);
            }

            if let Some(key) = poll_event(TICK_RATE)? {
                if let Some(msg) = handle_key_event(key, &mut self.ui, &self.browser) {
                    self.apply(msg);
                }
            }

            if self.browser.should_quit {
                break;
            }

            // Let spawned tasks make progress between frames
            tokio::task::yield_now().await;
        }

        Ok(())
    }

    /// Feed a message through the reducer and run the resulting command
    fn apply(&mut self, msg: Msg) {
        let command = update(&mut self.browser, msg);
        if !self.dispatcher.execute(command) {
            debug!("Quit requested");
            self.browser.should_quit = true;
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let theme = TerminalTheme::from(self.browser.theme.active());
        let area = frame.area();
        frame.render_widget(Block::default().style(theme.base()), area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Tab strip
                Constraint::Length(3), // Omnibox
                Constraint::Min(5),    // Page
                Constraint::Length(1), // Footer
            ])
            .split(area);

        self.render_tab_strip(frame, chunks[0], &theme);
        self.render_omnibox(frame, chunks[1], &theme);

        match self.browser.view_mode {
            ViewMode::Grid => self.render_grid(frame, chunks[2], &theme),
            ViewMode::Browser => self.render_browser(frame, chunks[2], &theme),
        }

        self.render_footer(frame, chunks[3], &theme);

        if self.browser.visible_summary().is_some() {
            self.render_summary(frame, area, &theme);
        }
        if self.browser.theme_store_open {
            self.render_theme_store(frame, area, &theme);
        }
        if self.ui.show_help {
            self.render_help(frame, area, &theme);
        }
    }

    fn render_tab_strip(&self, frame: &mut Frame, area: Rect, theme: &TerminalTheme) {
        frame.render_widget(Block::default().style(theme.surface()), area);

        let mode = match self.browser.view_mode {
            ViewMode::Browser => " ▤ ",
            ViewMode::Grid => " ▦ ",
        };
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(4)])
            .split(area);

        let strip = TabStrip::new(self.browser.tabs.tabs(), self.browser.tabs.active_position())
            .frame(self.ui.frame)
            .styles(theme.dimmed(), theme.header())
            .error_color(theme.error_red);
        frame.render_widget(strip, chunks[0]);
        frame.render_widget(Paragraph::new(Span::styled(mode, theme.accent())), chunks[1]);
    }

    fn render_omnibox(&self, frame: &mut Frame, area: Rect, theme: &TerminalTheme) {
        let tab = self.browser.tabs.active();
        let history = tab.history();
        let nav_style = |enabled: bool| if enabled { theme.text() } else { theme.dimmed() };

        let editing = self.ui.input_mode == InputMode::Omnibox;
        let (text, text_style) = if editing {
            (format!("{}▏", self.ui.omnibox), theme.text())
        } else if tab.url == crate::page::NEW_TAB_URL {
            ("Search or type a query...".to_string(), theme.dimmed())
        } else {
            (tab.url.clone(), theme.text())
        };

        let mut spans = vec![
            Span::styled(format!(" {} ", icons::BACK), nav_style(history.can_go_back())),
            Span::styled(format!("{} ", icons::FORWARD), nav_style(history.can_go_forward())),
            Span::styled(format!("{}  ", icons::REFRESH), theme.dimmed()),
        ];
        if tab.status == TabStatus::Loading {
            spans.push(Span::styled(
                format!("{} ", Spinner::new(self.ui.frame).current_char()),
                theme.accent(),
            ));
        } else {
            spans.push(Span::styled(format!("{} ", icons::SEARCH), theme.accent()));
        }
        spans.push(Span::styled(text, text_style));

        let mut indicators = Vec::new();
        if self.browser.listening {
            indicators.push(Span::styled(format!("{} listening ", icons::MIC), theme.error()));
        } else if self.dispatcher.speech_available() {
            indicators.push(Span::styled(format!("{} ", icons::MIC), theme.text()));
        }
        if self.browser.theme.is_ghost() {
            indicators.push(Span::styled(format!("{} ghost ", icons::GHOST), theme.accent()));
        }
        indicators.push(Span::styled(format!("{} ", self.provider_label), theme.dimmed()));

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border(editing))
            .title_bottom(Line::from(indicators).alignment(Alignment::Right));

        frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }

    fn render_browser(&self, frame: &mut Frame, area: Rect, theme: &TerminalTheme) {
        let mut constraints = Vec::new();
        if self.browser.history_open {
            constraints.push(Constraint::Length(32));
        }
        constraints.push(Constraint::Min(20));
        if self.browser.copilot_open {
            constraints.push(Constraint::Length(42));
        }

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(area);

        let mut idx = 0;
        if self.browser.history_open {
            self.render_history(frame, chunks[idx], theme);
            idx += 1;
        }
        self.render_page(frame, chunks[idx], theme);
        idx += 1;
        if self.browser.copilot_open {
            self.render_copilot(frame, chunks[idx], theme);
        }
    }

    fn render_page(&self, frame: &mut Frame, area: Rect, theme: &TerminalTheme) {
        let tab = self.browser.tabs.active();
        let focused = self.ui.focus(&self.browser) == Focus::Content;

        if tab.status == TabStatus::Loading {
            let banner = LoadingBanner::new(&tab.title, self.ui.frame).styles(
                theme.header(),
                theme.text(),
                theme.dimmed(),
            );
            frame.render_widget(banner, area);
            return;
        }

        let page = tab.current();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border(focused))
            .padding(Padding::horizontal(2));

        let lines = match page.kind {
            PageKind::NewTab if self.browser.customizing => self.customize_lines(theme),
            PageKind::NewTab => self.dashboard_lines(theme),
            PageKind::Error => error_lines(page, theme),
            PageKind::SearchResult | PageKind::DeepDive if self.browser.reader_mode => {
                let inner = block.inner(area);
                frame.render_widget(block.title(" Reader "), area);
                self.render_reader(frame, inner, page, theme);
                return;
            }
            PageKind::SearchResult | PageKind::DeepDive => self.result_lines(page, theme),
        };

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.ui.scroll, 0));
        frame.render_widget(paragraph, area);
    }

    fn item_style(&self, index: usize, theme: &TerminalTheme) -> Style {
        if self.ui.focus(&self.browser) == Focus::Content && index == self.ui.content_cursor {
            theme.selected()
        } else {
            theme.text()
        }
    }

    fn dashboard_lines(&self, theme: &TerminalTheme) -> Vec<Line<'static>> {
        let dashboard = &self.browser.dashboard;
        let mut lines = vec![Line::default()];
        let mut item = 0;

        if dashboard.is_enabled(WidgetType::Search) {
            lines.push(
                Line::from(Span::styled(
                    BRAND,
                    theme.header().add_modifier(Modifier::ITALIC),
                ))
                .alignment(Alignment::Center),
            );
            lines.push(Line::from(Span::styled(TAGLINE, theme.dimmed())).alignment(Alignment::Center));
            lines.push(Line::default());
            lines.push(
                Line::from(vec![
                    Span::styled(format!("{} ", icons::SEARCH), theme.accent()),
                    Span::styled("Press / to ask anything", theme.dimmed()),
                ])
                .alignment(Alignment::Center),
            );
            lines.push(Line::default());
        }

        if dashboard.is_enabled(WidgetType::Shortcuts) {
            lines.push(Line::from(Span::styled("Shortcuts", theme.header())));
            for (label, _) in SHORTCUTS {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(format!(" {} ", label), self.item_style(item, theme)),
                ]));
                item += 1;
            }
            lines.push(Line::default());
        }

        if dashboard.is_enabled(WidgetType::Weather) {
            lines.push(Line::from(Span::styled("Weather", theme.header())));
            lines.push(Line::from(vec![
                Span::styled(format!("  ☀ {}", WEATHER_CARD.0), theme.text().add_modifier(Modifier::BOLD)),
                Span::styled(format!("  {}", WEATHER_CARD.1), theme.dimmed()),
            ]));
            lines.push(Line::default());
        }

        if dashboard.is_enabled(WidgetType::News) {
            lines.push(Line::from(Span::styled("Top Stories", theme.header())));
            for headline in NEWS_HEADLINES {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(format!(" {} ", headline), self.item_style(item, theme)),
                ]));
                item += 1;
            }
            lines.push(Line::default());
        }

        lines.push(Line::from(Span::styled("C customize", theme.dimmed())));
        lines
    }

    fn customize_lines(&self, theme: &TerminalTheme) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled("Customize Dashboard", theme.header())),
            Line::default(),
        ];
        for (i, widget) in self.browser.dashboard.widgets().iter().enumerate() {
            let mark = if widget.enabled { icons::CHECK } else { " " };
            let style = if i == self.ui.widget_cursor {
                theme.selected()
            } else {
                theme.text()
            };
            lines.push(Line::from(Span::styled(
                format!(" [{}] {} ", mark, widget.widget_type),
                style,
            )));
        }
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Space toggle · Esc done",
            theme.dimmed(),
        )));
        lines
    }

    fn result_lines(&self, page: &PageContent, theme: &TerminalTheme) -> Vec<Line<'static>> {
        let (badge, badge_style) = match page.kind {
            PageKind::DeepDive => (
                format!("{} {}", icons::DEEP, page.kind),
                theme.warning().add_modifier(Modifier::BOLD),
            ),
            _ => (format!("{} {}", icons::SPARKLE, page.kind), theme.header()),
        };
        let mut lines = vec![
            Line::from(vec![
                Span::styled(format!("[ {} ]", badge), badge_style),
                Span::styled("   s summarize · R reader · d deep dive", theme.dimmed()),
            ]),
            Line::default(),
        ];
        if let Some(query) = &page.query {
            lines.push(Line::from(Span::styled(
                query.clone(),
                theme.text().add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::default());
        }

        lines.extend(render_markdown(page.body(), theme));

        if !page.links().is_empty() {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled("Sources", theme.header())));
            for link in page.links() {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {} ", icons::LINK), theme.accent()),
                    Span::styled(link.title.clone(), theme.text()),
                    Span::styled(format!("  {}", link.hostname()), theme.dimmed()),
                ]));
            }
        }

        if !page.topics().is_empty() {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled("Related", theme.header())));
            for (i, topic) in page.topics().iter().enumerate() {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(format!(" {} ", topic), self.item_style(i, theme)),
                ]));
            }
        }

        lines
    }

    /// Distraction-free view: query heading over the plain Markdown body
    fn render_reader(&self, frame: &mut Frame, area: Rect, page: &PageContent, theme: &TerminalTheme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(1)])
            .split(area);

        frame.render_widget(
            Paragraph::new(Span::styled(
                page.query.clone().unwrap_or_default(),
                theme.header().add_modifier(Modifier::UNDERLINED),
            )),
            chunks[0],
        );
        frame.render_widget(MarkdownView::new(page.body(), theme).scroll(self.ui.scroll), chunks[1]);
    }

    fn render_history(&self, frame: &mut Frame, area: Rect, theme: &TerminalTheme) {
        let history = self.browser.tabs.active().history();
        let focused = self.ui.focus(&self.browser) == Focus::History;

        let items: Vec<ListItem> = history
            .entries()
            .iter()
            .enumerate()
            .rev()
            .map(|(i, page)| {
                let marker = if i == history.index() { "▶ " } else { "  " };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, theme.accent()),
                    Span::styled(
                        utils::truncate(page.display_title(), 20),
                        theme.text(),
                    ),
                    Span::styled(
                        format!(" {}", page.timestamp.format("%H:%M")),
                        theme.dimmed(),
                    ),
                ]))
            })
            .collect();

        let mut state = ListState::default();
        if focused {
            state.select(Some(self.ui.history_cursor));
        }

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.border(focused))
                    .title(" History "),
            )
            .highlight_style(theme.selected());
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_copilot(&self, frame: &mut Frame, area: Rect, theme: &TerminalTheme) {
        let focused = self.ui.focus(&self.browser) == Focus::Copilot;
        let typing = self.ui.input_mode == InputMode::Copilot;

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border(focused || typing))
            .title(format!(" {} Copilot ", icons::SPARKLE));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(inner);

        let mut lines = Vec::new();
        for message in self.browser.copilot.messages() {
            let (label, style) = match message.role {
                ChatRole::User => ("You", theme.accent()),
                ChatRole::Model => ("Copilot", theme.header()),
            };
            lines.push(Line::from(Span::styled(label, style)));
            lines.extend(render_markdown(&message.text, theme));
            lines.push(Line::default());
        }
        if self.browser.copilot.is_thinking() {
            lines.push(Line::from(Span::styled(
                format!("{} thinking", Spinner::new(self.ui.frame).current_char()),
                theme.dimmed(),
            )));
        }

        // Keep the newest messages in view
        let height = chunks[0].height as usize;
        let overflow = lines.len().saturating_sub(height) as u16;
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .scroll((overflow.saturating_sub(if focused { self.ui.scroll } else { 0 }), 0)),
            chunks[0],
        );

        let input = if typing {
            Line::from(vec![
                Span::styled("> ", theme.accent()),
                Span::styled(format!("{}▏", self.ui.copilot_input), theme.text()),
            ])
        } else {
            Line::from(Span::styled("i ask about this page", theme.dimmed()))
        };
        frame.render_widget(Paragraph::new(input), chunks[1]);
    }

    fn render_grid(&self, frame: &mut Frame, area: Rect, theme: &TerminalTheme) {
        const COLUMNS: usize = 3;
        const CARD_HEIGHT: u16 = 6;

        let tabs = self.browser.tabs.tabs();
        let rows = tabs.len().div_ceil(COLUMNS);
        let row_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                (0..rows)
                    .map(|_| Constraint::Length(CARD_HEIGHT))
                    .chain([Constraint::Min(0)]),
            )
            .split(area);

        for (i, tab) in tabs.iter().enumerate() {
            let (row, col) = (i / COLUMNS, i % COLUMNS);
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Ratio(1, COLUMNS as u32); COLUMNS])
                .split(row_areas[row]);

            let selected = i == self.ui.grid_cursor;
            let active = i == self.browser.tabs.active_position();
            let status_style = match tab.status {
                TabStatus::Error => theme.error(),
                TabStatus::Loading => theme.warning(),
                _ => theme.dimmed(),
            };

            let body = vec![
                Line::from(Span::styled(utils::truncate(&tab.url, 40), theme.dimmed())),
                Line::from(vec![
                    Span::styled(tab.status.to_string(), status_style),
                    Span::styled(
                        format!("  {} pages", tab.history().len()),
                        theme.dimmed(),
                    ),
                ]),
            ];

            let title_style = if active { theme.header() } else { theme.text() };
            let card = Paragraph::new(body).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(if selected { theme.accent() } else { theme.dimmed() })
                    .title(Span::styled(
                        format!(" {} ", utils::truncate(&tab.title, 28)),
                        title_style,
                    )),
            );
            frame.render_widget(card, cols[col]);
        }
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect, theme: &TerminalTheme) {
        let line = if let Some(message) = &self.browser.status_message {
            Line::from(vec![
                Span::styled(format!(" {} ", message), theme.warning()),
                Span::styled(" Esc dismiss", theme.dimmed()),
            ])
        } else {
            let focus = self.ui.focus(&self.browser);
            let hints: &[(&str, &str)] = match self.ui.input_mode {
                InputMode::Omnibox | InputMode::Copilot => &[("Enter", "send"), ("Esc", "cancel")],
                InputMode::Normal => match focus {
                    Focus::Grid => &[("Enter", "open"), ("x", "close"), ("t", "new"), ("g", "back to page")],
                    Focus::ThemeStore => &[("Enter", "apply"), ("Esc", "close")],
                    _ => &[
                        ("/", "search"),
                        ("b/f", "back/fwd"),
                        ("t", "tab"),
                        ("w", "close"),
                        ("h", "history"),
                        ("c", "copilot"),
                        ("T", "themes"),
                        ("v", "voice"),
                        ("?", "help"),
                        ("q", "quit"),
                    ],
                },
            };

            let mut spans = vec![Span::styled(format!(" {} ", focus.label()), theme.selected())];
            for (key, action) in hints {
                spans.push(Span::styled(format!(" {}", key), theme.accent()));
                spans.push(Span::styled(format!(" {} ", action), theme.dimmed()));
            }
            Line::from(spans)
        };

        frame.render_widget(Paragraph::new(line).style(theme.surface()), area);
    }

    fn render_summary(&self, frame: &mut Frame, area: Rect, theme: &TerminalTheme) {
        let popup = utils::centered(area, 60, 40);
        let lines = match self.browser.visible_summary().and_then(|s| s.text.as_deref()) {
            Some(text) => render_markdown(text, theme),
            None => vec![Line::from(Span::styled(
                format!("{} Summarizing", Spinner::new(self.ui.frame).current_char()),
                theme.dimmed(),
            ))],
        };

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .style(theme.surface())
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(theme.accent())
                        .title(format!(" {} Summary ", icons::SPARKLE))
                        .title_bottom(" Esc close "),
                ),
            popup,
        );
    }

    fn render_theme_store(&self, frame: &mut Frame, area: Rect, theme: &TerminalTheme) {
        let popup = utils::centered(area, 50, 50);
        let active_id = &self.browser.theme.active().id;

        let items: Vec<ListItem> = available_themes()
            .into_iter()
            .map(|t| {
                let c = &t.colors;
                let mut spans: Vec<Span> = [&c.background, &c.surface, &c.accent, &c.text]
                    .into_iter()
                    .map(|hex| Span::styled("██", Style::default().fg(hex_color(hex))))
                    .collect();
                spans.push(Span::raw(format!("  {}", t.name)));
                if &t.id == active_id {
                    spans.push(Span::styled(format!("  {}", icons::CHECK), theme.success()));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let mut state = ListState::default();
        state.select(Some(self.ui.theme_cursor));

        frame.render_widget(Clear, popup);
        frame.render_stateful_widget(
            List::new(items)
                .style(theme.surface())
                .highlight_symbol("▶ ")
                .highlight_style(theme.header())
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(theme.accent())
                        .title(" Theme Store "),
                ),
            popup,
            &mut state,
        );
    }

    fn render_help(&self, frame: &mut Frame, area: Rect, theme: &TerminalTheme) {
        let popup = utils::centered(area, 50, 70);
        let bindings = [
            ("/ o", "Focus the omnibox"),
            ("b f", "Back / forward"),
            ("r", "Refresh"),
            ("t w", "New tab / close tab"),
            ("[ ]", "Previous / next tab"),
            ("g", "Tab grid"),
            ("h", "History panel"),
            ("c i", "Copilot panel / ask"),
            ("s", "Summarize page"),
            ("R", "Reader mode"),
            ("d", "Deep research"),
            ("v", "Voice search"),
            ("T G", "Theme store / ghost mode"),
            ("C", "Customize dashboard"),
            ("Tab", "Cycle panel focus"),
            ("j k", "Move / scroll"),
        ];
        let lines: Vec<Line> = bindings
            .iter()
            .map(|(key, text)| {
                Line::from(vec![
                    Span::styled(format!("{:>6}  ", key), theme.accent()),
                    Span::styled(*text, theme.text()),
                ])
            })
            .collect();

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines).style(theme.surface()).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.accent())
                    .title(" Keys "),
            ),
            popup,
        );
    }
}

fn error_lines(page: &PageContent, theme: &TerminalTheme) -> Vec<Line<'static>> {
    vec![
        Line::default(),
        Line::from(Span::styled("⚡ Connection Error", theme.error())).alignment(Alignment::Center),
        Line::default(),
        Line::from(Span::styled(
            page.error.clone().unwrap_or_default(),
            theme.dimmed(),
        ))
        .alignment(Alignment::Center),
    ]
}
