//! Application core — event loop and action dispatch.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use shelf_core::Catalog;

use crate::action::Action;
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screens::CatalogScreen;
use crate::theme;
use crate::tui::Tui;

const NOTIFICATION_TTL: Duration = Duration::from_secs(4);

const HELP_LINES: &[(&str, &str)] = &[
    ("/", "edit search (Enter keeps, Esc clears)"),
    ("c / C", "next / previous category"),
    ("m", "load more (when shown)"),
    ("r", "reload"),
    ("j / k", "move selection (details below the grid)"),
    ("?", "toggle help"),
    ("q / Ctrl-C", "quit"),
];

/// Top-level application state and event loop.
pub struct App {
    catalog: Catalog,
    screen: CatalogScreen,
    running: bool,
    help_visible: bool,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Stops the data bridge task.
    bridge_cancel: CancellationToken,
    notification: Option<(String, Instant)>,
}

impl App {
    pub fn new(catalog: Catalog) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            catalog,
            screen: CatalogScreen::new(),
            running: true,
            help_visible: false,
            action_tx,
            action_rx,
            bridge_cancel: CancellationToken::new(),
            notification: None,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        let bridge = tokio::spawn(crate::data_bridge::spawn_data_bridge(
            self.catalog.clone(),
            self.action_tx.clone(),
            self.bridge_cancel.clone(),
        ));
        self.catalog.start()?;

        let mut events = EventReader::new(Duration::from_millis(250), Duration::from_millis(33));
        info!(screen = self.screen.id(), "TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;
                if action == Action::Render {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        self.bridge_cancel.cancel();
        events.stop();
        let _ = bridge.await;
        self.catalog.shutdown().await;
        tui.exit();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Global keys first, unless the screen is taking text input.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Some(Action::Quit));
        }

        if !self.screen.captures_input() {
            if self.help_visible {
                return Ok(match key.code {
                    KeyCode::Char('?') | KeyCode::Esc => Some(Action::ToggleHelp),
                    KeyCode::Char('q') => Some(Action::Quit),
                    _ => None,
                });
            }
            match key.code {
                KeyCode::Char('q') => return Ok(Some(Action::Quit)),
                KeyCode::Char('?') => return Ok(Some(Action::ToggleHelp)),
                _ => {}
            }
        }

        self.screen.handle_key_event(key)
    }

    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,
            Action::ToggleHelp => self.help_visible = !self.help_visible,
            Action::SearchChanged(term) => self.catalog.set_search_term(term.as_str()),
            Action::CategorySelected(category) => self.catalog.set_category(category.clone()),
            Action::LoadMore => {
                if !self.catalog.load_more() {
                    self.notify("Nothing more to load");
                }
            }
            Action::Reload => {
                self.catalog.reload();
            }
            Action::Notify(message) => self.notify(message),
            Action::Tick => {
                if self
                    .notification
                    .as_ref()
                    .is_some_and(|(_, at)| at.elapsed() > NOTIFICATION_TTL)
                {
                    self.notification = None;
                }
            }
            Action::Resize(w, h) => debug!(w, h, "terminal resized"),
            Action::Render | Action::ViewUpdated(_) | Action::CategoriesLoaded(_) => {}
        }

        if let Some(follow_up) = self.screen.update(action)? {
            self.action_tx.send(follow_up)?;
        }
        Ok(())
    }

    fn notify(&mut self, message: &str) {
        self.notification = Some((message.to_owned(), Instant::now()));
    }

    fn render(&self, frame: &mut Frame) {
        let [main, status] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());

        self.screen.render(frame, main);

        if let Some((message, _)) = &self.notification {
            frame.render_widget(
                Paragraph::new(Span::styled(format!(" {message}"), theme::loading())),
                status,
            );
        }

        if self.help_visible {
            render_help(frame, main);
        }
    }
}

fn render_help(frame: &mut Frame, area: Rect) {
    let height = u16::try_from(HELP_LINES.len()).unwrap_or(u16::MAX).saturating_add(2);
    let [popup] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(52)])
        .flex(Flex::Center)
        .areas(popup);

    let lines: Vec<Line> = HELP_LINES
        .iter()
        .map(|(key, what)| {
            Line::from(vec![
                Span::styled(format!(" {key:<12}"), theme::key_hint_key()),
                Span::styled(*what, theme::table_row()),
            ])
        })
        .collect();

    let block = Block::default()
        .title(" Keys ")
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_active());

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}
