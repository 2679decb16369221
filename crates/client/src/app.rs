//! Frame loop tying input, the viewport and the terminal UI together.
use std::time::Instant;

use anyhow::Result;
use board_core::{
    BoardError, CursorMove, ErrorSeverity, PerspectiveCommand, Timestamp, Viewport, ViewportError,
};
use crossterm::event::{self as term_event, Event as TermEvent, KeyEventKind};
use ratatui::layout::Rect;
use tokio::time::{self, Duration, MissedTickBehavior};

use crate::{
    config::ClientConfig,
    input::{InputHandler, KeyAction, PointerAction},
    presentation::{
        board_view::{cell_canvas, cell_pointer},
        terminal::Tui,
        theme::Theme,
        ui::{self, UiLayout},
    },
    state::AppState,
};

pub struct App {
    config: ClientConfig,
    viewport: Viewport,
    state: AppState,
    input: InputHandler,
    theme: Theme,
    layout: UiLayout,
    started: Instant,
    /// Something changed that the last frame does not show.
    dirty: bool,
}

impl App {
    pub fn new(config: ClientConfig, viewport: Viewport) -> Self {
        let state = AppState::new(config.maneuver.clone(), config.hover_interval_ms);
        Self {
            config,
            viewport,
            state,
            input: InputHandler::new(),
            theme: Theme::default(),
            layout: UiLayout::default(),
            started: Instant::now(),
            dirty: true,
        }
    }

    pub async fn run(mut self, terminal: &mut Tui) -> Result<()> {
        tracing::info!("Board client starting...");

        self.resize(terminal)?;
        let now = self.now();
        let started = self.state.start(&mut self.viewport, now);
        self.absorb(started)?;

        let mut frames = time::interval(Duration::from_millis(self.config.frame_interval_ms));
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = frames.tick() => {
                    if self.handle_frame(terminal)? {
                        break;
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupted");
                    break;
                }
            }
        }

        tracing::info!("Board client exiting");
        Ok(())
    }

    /// Drains pending input, advances animations and redraws when needed.
    /// Returns `true` when the user asked to quit.
    fn handle_frame(&mut self, terminal: &mut Tui) -> Result<bool> {
        while term_event::poll(Duration::ZERO)? {
            match term_event::read()? {
                TermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    if self.handle_key(self.input.handle_key(key))? {
                        return Ok(true);
                    }
                }
                TermEvent::Mouse(mouse) => {
                    let action = self.input.handle_mouse(mouse);
                    self.handle_pointer(action)?;
                }
                TermEvent::Resize(_, _) => self.resize(terminal)?,
                _ => {}
            }
        }

        let animating = self.viewport.tick(self.now());
        if animating || self.dirty {
            ui::render(terminal, &self.viewport, &self.state, &self.theme)?;
            self.dirty = false;
        }
        Ok(false)
    }

    fn handle_key(&mut self, action: KeyAction) -> Result<bool> {
        let now = self.now();
        match action {
            KeyAction::Quit => return Ok(true),
            KeyAction::Cursor(direction) => {
                let moved = self.viewport.move_cursor(CursorMove::Direction(direction));
                if let Some(placement) = self.absorb(moved)? {
                    let previewed = self.state.cursor_moved(&mut self.viewport, placement, now);
                    self.absorb(previewed)?;
                }
            }
            KeyAction::Perspective(command) => {
                if !self.viewport.change_perspective(command, now) {
                    tracing::debug!(%command, "perspective unchanged");
                }
                if command == PerspectiveCommand::Home
                    && let Some(initial) = self.viewport.initial_cursor()
                {
                    let moved = self.viewport.move_cursor(CursorMove::To(initial));
                    if self.absorb(moved)?.is_some() {
                        let previewed = self.state.cursor_moved(&mut self.viewport, initial, now);
                        self.absorb(previewed)?;
                    }
                }
            }
            KeyAction::Select => {
                let selected = self.state.select_under_cursor(&mut self.viewport, now);
                self.absorb(selected)?;
            }
            KeyAction::Unselect => self.state.unselect(&mut self.viewport),
            KeyAction::None => return Ok(false),
        }
        self.dirty = true;
        Ok(false)
    }

    fn handle_pointer(&mut self, action: PointerAction) -> Result<()> {
        let (column, row, click) = match action {
            PointerAction::Hover { column, row } => (column, row, false),
            PointerAction::Click { column, row } => (column, row, true),
            PointerAction::None => return Ok(()),
        };
        if !self.layout.contains_board_cell(column, row) {
            return Ok(());
        }

        let pointer = cell_pointer(column, row);
        let now = self.now();
        let changed = if click {
            self.state.click(&mut self.viewport, pointer, now)
        } else {
            self.state.hover(&mut self.viewport, pointer, now)
        };
        if self.absorb(changed)?.unwrap_or(false) {
            self.dirty = true;
        }
        Ok(())
    }

    fn resize(&mut self, terminal: &mut Tui) -> Result<()> {
        let size = terminal.size()?;
        self.layout = UiLayout::new(Rect::new(0, 0, size.width, size.height));
        self.viewport.set_canvas(cell_canvas(self.layout.board));
        self.dirty = true;
        Ok(())
    }

    /// Logs recoverable and validation errors and carries on; fatal ones end
    /// the session.
    fn absorb<T>(&self, result: Result<T, ViewportError>) -> Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.severity() != ErrorSeverity::Fatal => {
                tracing::warn!(code = error.error_code(), "{}", error);
                Ok(None)
            }
            Err(error) => Err(error.into()),
        }
    }

    fn now(&self) -> Timestamp {
        let elapsed = self.started.elapsed().as_millis();
        Timestamp::from_millis(u64::try_from(elapsed).unwrap_or(u64::MAX))
    }
}
