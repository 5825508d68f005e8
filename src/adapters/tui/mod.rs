mod events;
mod theme;

use crate::interrupt::RestoreTerminal;
use crate::ports::{KeyInput, TerminalIo, TextAttrs};
use crossterm::cursor::Show;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

use events::key_input;

/// Set while a `TerminalSession` holds raw mode, so a signal handler on
/// another thread knows whether there is anything to undo.
static RAW_MODE: AtomicBool = AtomicBool::new(false);

/// Restores the process terminal from outside the owning `TerminalSession`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessTerminal;

impl RestoreTerminal for ProcessTerminal {
    fn is_raw(&self) -> bool {
        RAW_MODE.load(Ordering::SeqCst)
    }

    fn restore(&mut self) -> io::Result<()> {
        if !RAW_MODE.swap(false, Ordering::SeqCst) {
            return Ok(());
        }
        let mut stdout = io::stdout();
        disable_raw_mode()?;
        stdout.execute(LeaveAlternateScreen)?;
        stdout.execute(Show)?;
        Ok(())
    }
}

struct TextOp {
    row: u16,
    col: u16,
    text: String,
    attrs: TextAttrs,
}

/// Raw mode and the alternate screen for as long as the value lives.
/// Dropping it restores the terminal on every exit path, unwinding included.
pub struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    pending: Vec<TextOp>,
    active: bool,
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        RAW_MODE.store(true, Ordering::SeqCst);
        if let Err(err) = io::stdout().execute(EnterAlternateScreen) {
            let _ = disable_raw_mode();
            RAW_MODE.store(false, Ordering::SeqCst);
            return Err(err);
        }
        let terminal = match Terminal::new(CrosstermBackend::new(io::stdout())) {
            Ok(terminal) => terminal,
            Err(err) => {
                let _ = disable_raw_mode();
                let _ = io::stdout().execute(LeaveAlternateScreen);
                RAW_MODE.store(false, Ordering::SeqCst);
                return Err(err);
            }
        };
        let mut session = Self {
            terminal,
            pending: Vec::new(),
            active: true,
        };
        session.terminal.hide_cursor()?;
        session.terminal.clear()?;
        Ok(session)
    }

    /// Restore the terminal now and report failures, instead of silently on drop.
    pub fn leave(mut self) -> io::Result<()> {
        self.restore()
    }

    fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        RAW_MODE.store(false, Ordering::SeqCst);
        disable_raw_mode()?;
        io::stdout().execute(LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if self.active {
            self.active = false;
            RAW_MODE.store(false, Ordering::SeqCst);
            let _ = disable_raw_mode();
            let _ = io::stdout().execute(LeaveAlternateScreen);
            let _ = self.terminal.show_cursor();
        }
    }
}

impl TerminalIo for TerminalSession {
    fn size(&self) -> io::Result<(u16, u16)> {
        let (cols, rows) = terminal::size()?;
        Ok((rows, cols))
    }

    fn clear(&mut self) -> io::Result<()> {
        self.pending.clear();
        Ok(())
    }

    fn draw_text(&mut self, row: u16, col: u16, text: &str, attrs: TextAttrs) -> io::Result<()> {
        self.pending.push(TextOp {
            row,
            col,
            text: text.to_string(),
            attrs,
        });
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        let ops = std::mem::take(&mut self.pending);
        self.terminal.draw(|frame| {
            let area = frame.size();
            let buffer = frame.buffer_mut();
            for op in &ops {
                // The screen may have shrunk since the menu measured it.
                if op.row >= area.height || op.col >= area.width {
                    continue;
                }
                let room = (area.width - op.col) as usize;
                buffer.set_stringn(op.col, op.row, &op.text, room, theme::style_for(op.attrs));
            }
        })?;
        Ok(())
    }

    fn read_key(&mut self) -> io::Result<KeyInput> {
        loop {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(key_input(key)),
                Event::Resize(_, _) => return Ok(KeyInput::Resize),
                _ => {}
            }
        }
    }
}
