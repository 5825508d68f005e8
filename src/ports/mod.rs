use crate::domain::error::DiscoveryError;
use crate::domain::{ScriptEntry, SessionSummary};
use std::io::{self, Write};

pub trait ScriptRepository {
    fn scan(&self) -> Result<Vec<ScriptEntry>, DiscoveryError>;
}

pub trait ScriptRunner {
    /// Runs `scripts` one after another, writing their output and the final
    /// ledger to `out`.
    fn run(&self, scripts: &[ScriptEntry], out: &mut dyn Write) -> SessionSummary;
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyInput {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Escape,
    Char(char),
    Interrupt,
    Resize,
    Other,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct TextAttrs {
    pub highlight: bool,
    pub bold: bool,
    pub dim: bool,
}

impl TextAttrs {
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn highlighted() -> Self {
        Self {
            highlight: true,
            ..Self::default()
        }
    }

    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Self::default()
        }
    }

    pub fn dim() -> Self {
        Self {
            dim: true,
            ..Self::default()
        }
    }
}

/// Minimal screen capability the menu draws through.
pub trait TerminalIo {
    /// `(rows, columns)` of the visible screen.
    fn size(&self) -> io::Result<(u16, u16)>;
    fn clear(&mut self) -> io::Result<()>;
    fn draw_text(&mut self, row: u16, col: u16, text: &str, attrs: TextAttrs) -> io::Result<()>;
    /// Flush everything drawn since the last `clear` to the screen.
    fn present(&mut self) -> io::Result<()>;
    /// Blocks until the next key press or resize.
    fn read_key(&mut self) -> io::Result<KeyInput>;
}
