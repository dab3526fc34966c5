//! Interactive terminal host that drives a [`PoiScreen`].
//!
//! The host owns the event loop: it pumps search completions into the
//! screen, re-reads the template when the screen requests a render, and
//! feeds key presses back as serialized interaction events.

mod render;
pub mod theme;

pub use theme::Theme;

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::Duration;

use anyhow::{Result, anyhow};
use ratatui::Frame;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::layout::{Constraint, Direction, Layout};
use throbber_widgets_tui::ThrobberState;

use crate::map::MapOverlay;
use crate::screen::{PlaceListTemplate, PoiScreen, RoutePreviewRequest, ScreenState};
use crate::types::CategoryId;

/// Captures the outcome of a browse interaction.
#[derive(Debug, Clone)]
pub struct BrowseOutcome {
    pub accepted: bool,
    pub route: Option<RoutePreviewRequest>,
    pub category: CategoryId,
}

impl BrowseOutcome {
    /// The route hand-off, if the user confirmed a row.
    #[must_use]
    pub fn route_request(&self) -> Option<&RoutePreviewRequest> {
        self.route.as_ref()
    }
}

/// Terminal host for one category list screen.
pub struct BrowseHost {
    screen: PoiScreen,
    overlay: MapOverlay,
    selected: usize,
    dirty: bool,
    throbber_state: ThrobberState,
    theme: Theme,
}

impl BrowseHost {
    #[must_use]
    pub fn new(screen: PoiScreen, overlay: MapOverlay) -> Self {
        Self {
            screen,
            overlay,
            selected: 0,
            dirty: true,
            throbber_state: ThrobberState::default(),
            theme: Theme::default(),
        }
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Pump the terminal event loop until the user exits with an outcome.
    pub fn run(mut self) -> Result<BrowseOutcome> {
        let mut terminal = ratatui::init();
        terminal.clear()?;

        let (event_tx, event_rx) = mpsc::channel();
        let event_loop_running = Arc::new(AtomicBool::new(true));
        let event_loop_flag = Arc::clone(&event_loop_running);

        let event_thread = thread::spawn(move || -> Result<()> {
            while event_loop_flag.load(Ordering::Relaxed) {
                if event::poll(Duration::from_millis(50))? {
                    let event = event::read()?;
                    if event_tx.send(event).is_err() {
                        break;
                    }
                }
            }
            Ok(())
        });

        let mut pending_events = VecDeque::new();

        let result: Result<BrowseOutcome> = 'event_loop: loop {
            self.screen.pump_completions();
            if self.screen.is_searching() {
                self.throbber_state.calc_next();
                self.dirty = true;
            }

            loop {
                match event_rx.try_recv() {
                    Ok(Event::Resize(_, _)) => self.dirty = true,
                    Ok(event) => pending_events.push_back(event),
                    Err(mpsc::TryRecvError::Empty) => break,
                    Err(mpsc::TryRecvError::Disconnected) => {
                        break 'event_loop Err(anyhow!("input event channel disconnected"));
                    }
                }
            }

            if self.screen.take_render_request() || self.dirty {
                self.clamp_selection();
                let template = self.screen.template();
                terminal.draw(|frame| self.draw(frame, &template))?;
                self.dirty = false;
            }

            let mut maybe_outcome = None;
            while let Some(event) = pending_events.pop_front() {
                match event {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if let Some(outcome) = self.handle_key(key) {
                            maybe_outcome = Some(outcome);
                            break;
                        }
                    }
                    _ => {}
                }
            }

            if let Some(outcome) = maybe_outcome {
                break Ok(outcome);
            }

            thread::sleep(Duration::from_millis(16));
        };

        ratatui::restore();

        event_loop_running.store(false, Ordering::Relaxed);
        match event_thread.join() {
            Ok(join_result) => join_result?,
            Err(err) => std::panic::resume_unwind(err),
        }

        self.screen.teardown();
        result
    }

    fn draw(&self, frame: &mut Frame, template: &PlaceListTemplate) {
        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(frame.area());
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(panes[0]);

        render::render_list(
            frame,
            left[0],
            render::ListContext {
                template,
                selected: self.selected,
                searching: self.screen.is_searching(),
                throbber_state: &self.throbber_state,
                theme: &self.theme,
            },
        );
        render::render_status(frame, left[1], self.status_hints(), &self.theme);
        render::render_map(
            frame,
            panes[1],
            &self.overlay,
            self.screen.reference(),
            &self.theme,
        );
    }

    fn status_hints(&self) -> &'static str {
        match self.screen.state() {
            ScreenState::Loading => "r refresh  q back",
            ScreenState::Empty => "r refresh  q back",
            ScreenState::Populated(_) => "up/down select  enter choose  r refresh  q back",
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<BrowseOutcome> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Some(self.cancelled()),
            KeyCode::Up => {
                self.move_selection(-1);
                None
            }
            KeyCode::Down => {
                self.move_selection(1);
                None
            }
            KeyCode::Char('r') => {
                self.selected = 0;
                self.screen.refresh_search();
                None
            }
            KeyCode::Enter => self.activate(),
            _ => None,
        }
    }

    /// Activate the selected slot: a row hands off to route preview, the
    /// trailing more-results slot re-requests the template.
    fn activate(&mut self) -> Option<BrowseOutcome> {
        if self.selected >= self.selectable_len() {
            return None;
        }
        if self.selected < self.row_len() {
            let route = self.screen.on_result_click(self.selected)?;
            return Some(BrowseOutcome {
                accepted: true,
                route: Some(route),
                category: self.screen.category().id.clone(),
            });
        }
        self.screen.on_click_search_more();
        None
    }

    fn cancelled(&self) -> BrowseOutcome {
        BrowseOutcome {
            accepted: false,
            route: None,
            category: self.screen.category().id.clone(),
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.selectable_len();
        if len == 0 {
            return;
        }
        let current = self.selected.min(len - 1) as isize;
        let next = (current + delta).clamp(0, len as isize - 1) as usize;
        if next != self.selected {
            self.selected = next;
            self.dirty = true;
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.selectable_len();
        if len == 0 {
            self.selected = 0;
        } else {
            self.selected = self.selected.min(len - 1);
        }
    }

    fn row_len(&self) -> usize {
        match self.screen.state() {
            ScreenState::Populated(rows) => rows.len(),
            _ => 0,
        }
    }

    /// Rows plus the more-results slot when the list was truncated.
    fn selectable_len(&self) -> usize {
        match self.screen.state() {
            ScreenState::Populated(rows) => rows.len() + usize::from(rows.truncated()),
            _ => 0,
        }
    }
}
