//! Terminal session for the board view: raw mode, alternate screen and mouse
//! capture for picking, all handed back exactly once.
use std::io::{self, Stdout};

use anyhow::Result;
use crossterm::{
    cursor::{Hide, Show},
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Owns the terminal while the board is on screen.
///
/// Dropping the session restores the terminal, so an error returned from the
/// app loop still leaves the shell usable.
pub struct BoardTerminal {
    tui: Tui,
    active: bool,
}

impl BoardTerminal {
    pub fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture, Hide) {
            let _ = release();
            return Err(error.into());
        }

        let tui = Terminal::new(CrosstermBackend::new(stdout))?;
        tracing::debug!("terminal session started");
        Ok(Self { tui, active: true })
    }

    pub fn tui(&mut self) -> &mut Tui {
        &mut self.tui
    }

    /// Restores the terminal. Later calls, and the drop, do nothing.
    pub fn leave(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        release()?;
        tracing::debug!("terminal session ended");
        Ok(())
    }
}

impl Drop for BoardTerminal {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

fn release() -> io::Result<()> {
    execute!(io::stdout(), Show, DisableMouseCapture, LeaveAlternateScreen)?;
    disable_raw_mode()
}
