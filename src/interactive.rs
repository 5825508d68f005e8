use crate::adapters::session_log::SessionLog;
use crate::adapters::tui::TerminalSession;
use crate::config::Settings;
use crate::domain::{ScriptEntry, SelectionMode};
use crate::menu::{MenuController, MenuError, MenuOutcome};
use crate::summary;
use crate::use_cases::SelectorService;
use std::error::Error;
use std::io::{self, BufRead, Write};

pub struct MenuOptions {
    pub mode: SelectionMode,
    pub assume_yes: bool,
}

pub fn run_menu(
    service: &SelectorService,
    settings: &Settings,
    options: &MenuOptions,
    log: &SessionLog,
) -> Result<(), Box<dyn Error>> {
    let scripts = match service.discover() {
        Ok(scripts) => scripts,
        Err(err) => {
            log.append(&format!("Discovery failed: {}", err));
            return Err(err.into());
        }
    };
    if scripts.is_empty() {
        println!("No scripts found in {}.", settings.scripts_dir.display());
        return Ok(());
    }

    let controller = MenuController::new(options.mode, log.clone());
    let mut session = TerminalSession::enter()?;
    let outcome = controller.run(&mut session, scripts);
    let restored = session.leave();
    let outcome = settle_menu(outcome, restored, log)?;

    let chosen = match outcome {
        MenuOutcome::Cancelled => {
            println!("No scripts were executed. Exiting.");
            return Ok(());
        }
        MenuOutcome::Confirmed(chosen) if chosen.is_empty() => {
            println!("No scripts were selected. Exiting.");
            return Ok(());
        }
        MenuOutcome::Confirmed(chosen) => chosen,
    };

    if !options.assume_yes {
        let stdin = io::stdin();
        confirm_start(&chosen, &mut stdin.lock(), &mut io::stdout())?;
    }

    println!("\nExecuting selected scripts...\n");
    let mut stdout = io::stdout();
    let summary = service.run_scripts(&chosen, &mut stdout);
    for line in summary::log_lines(&summary) {
        log.append(&line);
    }
    Ok(())
}

/// Combine the menu result with the terminal teardown. A menu failure wins
/// over a teardown failure; both are logged.
fn settle_menu(
    outcome: Result<MenuOutcome, MenuError>,
    restored: io::Result<()>,
    log: &SessionLog,
) -> Result<MenuOutcome, Box<dyn Error>> {
    match (outcome, restored) {
        (Ok(outcome), Ok(())) => Ok(outcome),
        (Ok(_), Err(err)) => {
            log.append(&format!("Failed to restore terminal: {}", err));
            Err(err.into())
        }
        (Err(err), restored) => {
            log.append(&format!("Menu aborted: {}", err));
            if let Err(restore_err) = restored {
                log.append(&format!("Failed to restore terminal: {}", restore_err));
            }
            if let Some(path) = log.path() {
                eprintln!("Details were written to {}", path.display());
            }
            Err(err.into())
        }
    }
}

fn confirm_start(
    chosen: &[ScriptEntry],
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> io::Result<()> {
    writeln!(out, "The following scripts will be executed in order:")?;
    for script in chosen {
        writeln!(out, "- {}", script.file_name)?;
    }
    write!(out, "\nPress Enter to start execution...")?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(())
}
