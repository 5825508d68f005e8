mod app;
mod events;
mod ui;

pub use app::MenuOutcome;

use crate::adapters::session_log::SessionLog;
use crate::domain::{ScriptEntry, SelectionMode};
use crate::ports::TerminalIo;
use app::MenuState;
use std::io;
use thiserror::Error;

/// Consecutive failed redraws after which the terminal is considered gone.
const MAX_RENDER_FAILURES: u32 = 8;

#[derive(Debug, Error)]
pub enum MenuError {
    #[error("no scripts to choose from")]
    Empty,
    #[error("unable to read keyboard input: {0}")]
    Input(#[source] io::Error),
    #[error("terminal rendering failed repeatedly: {0}")]
    Render(#[source] io::Error),
}

pub struct MenuController {
    mode: SelectionMode,
    log: SessionLog,
}

impl MenuController {
    pub fn new(mode: SelectionMode, log: SessionLog) -> Self {
        Self { mode, log }
    }

    pub fn run<T: TerminalIo + ?Sized>(
        &self,
        terminal: &mut T,
        entries: Vec<ScriptEntry>,
    ) -> Result<MenuOutcome, MenuError> {
        if entries.is_empty() {
            return Err(MenuError::Empty);
        }

        let mut state = MenuState::new(entries, self.mode);
        let mut render_failures = 0;
        loop {
            match ui::render(terminal, &mut state) {
                Ok(()) => render_failures = 0,
                Err(err) => {
                    // Usually a resize racing the draw; the next key redraws.
                    self.log.append(&format!("Render error: {}", err));
                    tracing::warn!(error = %err, "menu render failed");
                    render_failures += 1;
                    if render_failures >= MAX_RENDER_FAILURES {
                        return Err(MenuError::Render(err));
                    }
                }
            }

            let key = terminal.read_key().map_err(MenuError::Input)?;
            let Some(action) = events::action_for(key, self.mode) else {
                continue;
            };
            if state.layout.is_none() && !events::allowed_while_too_small(action) {
                continue;
            }
            state.apply(action);
            if let Some(outcome) = state.outcome() {
                if let MenuOutcome::Confirmed(chosen) = &outcome {
                    tracing::debug!(count = chosen.len(), "menu confirmed");
                }
                return Ok(outcome);
            }
        }
    }
}
