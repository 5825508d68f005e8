use crate::adapters::session_log::SessionLog;
use std::io::{self, Write};
use std::process;

pub const INTERRUPT_MESSAGE: &str = "Ctrl+C pressed, exiting.";

pub const INTERRUPT_EXIT_CODE: i32 = 0;

/// The part of the terminal an interrupt handler may need to undo.
pub trait RestoreTerminal {
    fn is_raw(&self) -> bool;
    fn restore(&mut self) -> io::Result<()>;
}

/// Install a SIGINT handler that puts the terminal back and exits cleanly.
/// Raw mode swallows Ctrl+C as a key, so this fires for signals sent from
/// outside the menu and while scripts are running.
pub fn install<T>(mut terminal: T, log: SessionLog) -> Result<(), ctrlc::Error>
where
    T: RestoreTerminal + Send + 'static,
{
    ctrlc::set_handler(move || {
        let code = handle_interrupt(&mut terminal, &log, &mut io::stdout());
        process::exit(code);
    })
}

pub fn handle_interrupt(
    terminal: &mut dyn RestoreTerminal,
    log: &SessionLog,
    out: &mut dyn Write,
) -> i32 {
    if terminal.is_raw() {
        if let Err(err) = terminal.restore() {
            log.append(&format!("Failed to restore terminal after interrupt: {}", err));
        }
    }
    log.append("Interrupted by SIGINT");
    let _ = writeln!(out, "\n{}", INTERRUPT_MESSAGE);
    let _ = out.flush();
    INTERRUPT_EXIT_CODE
}
