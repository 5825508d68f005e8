mod adapters;
mod cli;
mod completion;
mod config;
mod domain;
mod interactive;
mod interrupt;
mod list;
mod menu;
mod ports;
mod run;
mod summary;
mod use_cases;
mod util;

use adapters::script_catalog::FsScriptCatalog;
use adapters::script_runner::SequentialScriptRunner;
use adapters::session_log::{self, SessionLog};
use adapters::tui::ProcessTerminal;
use clap::Parser;
use cli::{Cli, Commands};
use config::Settings;
use domain::{RunnerMode, SelectionMode};
use interactive::MenuOptions;
use std::error::Error;
use std::process::ExitCode;
use use_cases::SelectorService;

fn runner_mode(inherit: bool) -> RunnerMode {
    if inherit {
        RunnerMode::Inherit
    } else {
        RunnerMode::Streaming
    }
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", error_message(err.as_ref()));
            ExitCode::FAILURE
        }
    }
}

fn error_message(err: &dyn Error) -> String {
    format!("Error: {}", err)
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let settings = Settings::from_env(&cli.catalog);

    let log = match &settings.log_file {
        Some(path) => SessionLog::new(path.clone()),
        None => SessionLog::disabled(),
    };
    session_log::init_tracing(&log);
    tracing::debug!(dir = %settings.scripts_dir.display(), "starting");
    if let Err(err) = interrupt::install(ProcessTerminal, log.clone()) {
        tracing::warn!(error = %err, "unable to install interrupt handler");
    }

    let inherit = match &cli.command {
        Some(Commands::Run { inherit, .. }) => *inherit || cli.inherit,
        _ => cli.inherit,
    };
    let repo = Box::new(FsScriptCatalog::new(
        settings.scripts_dir.clone(),
        settings.naming.clone(),
        log.clone(),
    ));
    let runner = Box::new(SequentialScriptRunner::new(runner_mode(inherit)));
    let service = SelectorService::new(repo, runner);

    match cli.command {
        Some(Commands::List { json }) => list::run_list(&service, &settings, json),
        Some(Commands::Run { scripts, .. }) => {
            run::run_named(&service, &settings.naming, &scripts, &log)
        }
        Some(Commands::Config) => {
            config::run_config(&settings);
            Ok(())
        }
        Some(Commands::Completion { shell }) => {
            completion::write_completion(shell, &mut std::io::stdout());
            Ok(())
        }
        None => {
            let options = MenuOptions {
                mode: if cli.single {
                    SelectionMode::Single
                } else {
                    SelectionMode::Multi
                },
                assume_yes: cli.yes,
            };
            interactive::run_menu(&service, &settings, &options, &log)
        }
    }
}
