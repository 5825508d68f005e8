use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pickrun", version)]
#[command(about = "Pick shell scripts from a menu and run them in order", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Single-select mode: Enter runs the highlighted script
    #[arg(short, long)]
    pub single: bool,

    /// Let scripts inherit the terminal instead of streaming their output
    #[arg(long)]
    pub inherit: bool,

    /// Skip the confirmation prompt before running
    #[arg(short = 'y', long)]
    pub yes: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct CatalogArgs {
    /// Script directory [env: PICKRUN_SCRIPTS_DIR]
    #[arg(short, long, global = true, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// File name prefix filter [env: PICKRUN_PREFIX]
    #[arg(long, global = true)]
    pub prefix: Option<String>,

    /// File name suffix filter [env: PICKRUN_EXTENSION]
    #[arg(long, global = true, value_name = "EXT")]
    pub extension: Option<String>,

    /// Diagnostic log file [env: PICKRUN_LOG_FILE]
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Disable the diagnostic log
    #[arg(long, global = true)]
    pub no_log: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the scripts the menu would offer
    #[command(alias = "ls")]
    List {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run scripts by name without the menu
    Run {
        /// Script file names, with or without the extension
        #[arg(required = true, num_args = 1..)]
        scripts: Vec<String>,

        /// Let scripts inherit the terminal instead of streaming their output
        #[arg(long)]
        inherit: bool,
    },

    /// Show resolved settings and environment overrides
    #[command(alias = "env")]
    Config,

    /// Generate a shell completion script
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_menu_flags() {
        let cli =
            Cli::try_parse_from(["pickrun", "--single", "-y", "--dir", "/opt/scripts"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.single);
        assert!(cli.yes);
        assert_eq!(cli.catalog.dir, Some(PathBuf::from("/opt/scripts")));
    }

    #[test]
    fn test_run_requires_names() {
        assert!(Cli::try_parse_from(["pickrun", "run"]).is_err());
        let args = ["pickrun", "run", "new-a", "new-b.sh", "--prefix", "install"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Some(Commands::Run { scripts, inherit }) => {
                assert_eq!(scripts, ["new-a", "new-b.sh"]);
                assert!(!inherit);
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert_eq!(cli.catalog.prefix.as_deref(), Some("install"));
    }
}
