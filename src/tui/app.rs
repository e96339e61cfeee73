//! Main TUI application logic.

use super::{events, BannerList, Theme};
use crate::services::{BannerController, LocationProvider, MessageBus, Options};
use crate::types::{BannerView, NavItem};
use crate::AppState;
use crossterm::{
    event::{KeyCode, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame, Terminal,
};
use std::{io, sync::Arc, time::Duration};
use tokio::task::JoinHandle;

/// Main TUI application.
pub struct App {
    /// Top-level menu entries shown as tabs.
    tabs: Vec<NavItem>,
    /// Index of the current tab.
    selected: usize,
    bus: Arc<MessageBus>,
    controller: BannerController,
    location: LocationProvider,
    /// Theme.
    theme: Theme,
    /// Should quit.
    should_quit: bool,
    /// Demo notices published so far.
    published: u64,
}

impl App {
    /// Create a new TUI application.
    pub fn new(state: &AppState) -> Self {
        let tabs = state.menu.visible_to(None);
        let start = tabs
            .first()
            .map(|tab| tab.href.clone())
            .unwrap_or_else(|| "/".to_string());

        Self {
            tabs,
            selected: 0,
            bus: state.bus.clone(),
            controller: state.banner_controller(None),
            location: LocationProvider::new(start),
            theme: Theme::default(),
            should_quit: false,
            published: 0,
        }
    }

    /// Mount the banner controller and start following tab changes.
    pub fn start(&self) -> JoinHandle<()> {
        self.controller.mount();
        self.controller.follow(&self.location)
    }

    pub fn controller(&self) -> &BannerController {
        &self.controller
    }

    pub fn location(&self) -> String {
        self.location.current()
    }

    /// Handle an event.
    pub fn handle_event(&mut self, event: events::Event) {
        match event {
            events::Event::Key(key) => self.handle_key(key),
            events::Event::Tick => {
                // Banner expiry runs on its own timers
            }
            events::Event::Resize(_, _) => {
                // Terminal will handle resize automatically
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if events::is_quit(&key) {
            self.should_quit = true;
            return;
        }

        if let Some(index) = events::tab_index(&key) {
            self.select_tab(index);
            return;
        }

        let channel = self.controller.channel().to_string();
        match key.code {
            KeyCode::Left => self.select_tab(self.selected.saturating_sub(1)),
            KeyCode::Right => self.select_tab(self.selected + 1),
            KeyCode::Char('s') => {
                self.published += 1;
                self.bus.success(
                    &channel,
                    "Done",
                    &format!("Saved change #{}", self.published),
                    Options {
                        auto_close: true,
                        ..Options::default()
                    },
                );
            }
            KeyCode::Char('e') => {
                self.published += 1;
                self.bus.error(
                    &channel,
                    "Error",
                    &format!("Request #{} failed", self.published),
                    Options {
                        keep_after_route_change: true,
                        ..Options::default()
                    },
                );
            }
            KeyCode::Char('i') => {
                self.published += 1;
                self.bus.info(
                    &channel,
                    "Note",
                    &format!("Notice #{}", self.published),
                    Options::default(),
                );
            }
            KeyCode::Char('c') => {
                self.bus.clear_signal(&channel);
            }
            KeyCode::Char('x') => {
                if let Some(first) = self.controller.banners().first() {
                    self.controller.dismiss(first.instance_id);
                }
            }
            _ => {}
        }
    }

    fn select_tab(&mut self, index: usize) {
        if let Some(tab) = self.tabs.get(index) {
            self.selected = index;
            self.location.navigate(&tab.href);
        }
    }

    /// Check if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Render the TUI.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.size();
        let banners = self.controller.views();
        let banner_rows = banner_rows(banners.len());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),           // Tabs
                Constraint::Length(banner_rows), // Banners
                Constraint::Min(0),              // Content
                Constraint::Length(3),           // Status bar
            ])
            .split(area);

        self.render_tabs(frame, chunks[0]);
        self.render_banners(frame, chunks[1], &banners);
        self.render_content(frame, chunks[2]);
        self.render_status_bar(frame, chunks[3]);
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = self
            .tabs
            .iter()
            .enumerate()
            .map(|(i, tab)| {
                Line::from(vec![
                    Span::styled(format!("[{}] ", i + 1), self.theme.muted()),
                    Span::raw(tab.name.clone()),
                ])
            })
            .collect();

        let tabs = Tabs::new(titles)
            .block(Block::default().borders(Borders::ALL).title("Navigation"))
            .select(self.selected)
            .style(self.theme.tab_inactive())
            .highlight_style(self.theme.tab_active());

        frame.render_widget(tabs, area);
    }

    fn render_banners(&self, frame: &mut Frame, area: Rect, banners: &[BannerView]) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border())
            .title(format!("Messages ({})", self.controller.channel()));

        frame.render_widget(BannerList::new(banners, &self.theme).block(block), area);
    }

    fn render_content(&self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![Line::from(Span::styled(
            self.location.current(),
            self.theme.title(),
        ))];
        if let Some(tab) = self.tabs.get(self.selected) {
            lines.extend(tab.children().iter().map(|child| {
                Line::from(vec![
                    Span::raw(format!("  {}  ", child.name)),
                    Span::styled(child.href.clone(), self.theme.muted()),
                ])
            }));
        }

        let content = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
        frame.render_widget(content, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let text = Line::from(vec![
            Span::styled("Noticeboard", self.theme.title()),
            Span::raw(" | "),
            Span::styled("s/e/i", self.theme.muted()),
            Span::raw(" publish | "),
            Span::styled("c", self.theme.muted()),
            Span::raw(" clear | "),
            Span::styled("x", self.theme.muted()),
            Span::raw(" dismiss | "),
            Span::styled("1-9", self.theme.muted()),
            Span::raw(" navigate | "),
            Span::styled("q", self.theme.muted()),
            Span::raw(" quit"),
        ]);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border());

        frame.render_widget(block, area);

        let inner = Rect {
            x: area.x + 2,
            y: area.y + 1,
            width: area.width.saturating_sub(4),
            height: 1,
        };

        frame.render_widget(text, inner);
    }
}

/// Height of the banner block: one row per banner plus borders.
fn banner_rows(count: usize) -> u16 {
    u16::try_from(count.max(1))
        .unwrap_or(u16::MAX)
        .saturating_add(2)
}

/// Run the TUI application.
pub async fn run_tui(state: AppState) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and event handler
    let mut app = App::new(&state);
    let follow_task = app.start();
    let mut event_handler = events::EventHandler::new(Duration::from_millis(250));

    // Main loop
    loop {
        terminal.draw(|f| app.render(f))?;

        if let Some(event) = event_handler.next().await {
            app.handle_event(event);
        }

        if app.should_quit() {
            break;
        }
    }

    follow_task.abort();
    app.controller().unmount();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
