use crate::cli::CatalogArgs;
use crate::domain::NamingConvention;
use std::env;
use std::path::PathBuf;

pub const SCRIPTS_DIR_ENV: &str = "PICKRUN_SCRIPTS_DIR";
pub const PREFIX_ENV: &str = "PICKRUN_PREFIX";
pub const EXTENSION_ENV: &str = "PICKRUN_EXTENSION";
pub const LOG_FILE_ENV: &str = "PICKRUN_LOG_FILE";

const DEFAULT_SCRIPTS_DIR: &str = "new_linux";
const DEFAULT_LOG_FILE: &str = "pickrun-debug.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub scripts_dir: PathBuf,
    pub naming: NamingConvention,
    pub log_file: Option<PathBuf>,
}

impl Settings {
    pub fn from_env(args: &CatalogArgs) -> Self {
        Self::resolve(args, |key| env::var(key).ok())
    }

    /// Flags win over environment variables, which win over defaults.
    pub fn resolve<F>(args: &CatalogArgs, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = NamingConvention::default();

        let scripts_dir = args
            .dir
            .clone()
            .or_else(|| lookup(SCRIPTS_DIR_ENV).map(PathBuf::from))
            .unwrap_or_else(default_scripts_dir);
        let prefix = args
            .prefix
            .clone()
            .or_else(|| lookup(PREFIX_ENV))
            .unwrap_or(defaults.prefix);
        let extension = args
            .extension
            .clone()
            .or_else(|| lookup(EXTENSION_ENV))
            .unwrap_or(defaults.extension);
        let log_file = if args.no_log {
            None
        } else {
            Some(
                args.log_file
                    .clone()
                    .or_else(|| lookup(LOG_FILE_ENV).map(PathBuf::from))
                    .unwrap_or_else(default_log_file),
            )
        };

        Self {
            scripts_dir,
            naming: NamingConvention::new(prefix, extension),
            log_file,
        }
    }
}

fn default_scripts_dir() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join(DEFAULT_SCRIPTS_DIR),
        None => PathBuf::from("scripts"),
    }
}

fn default_log_file() -> PathBuf {
    env::temp_dir().join(DEFAULT_LOG_FILE)
}

pub fn run_config(settings: &Settings) {
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!("Scripts dir: {}", settings.scripts_dir.display());
    println!("Prefix: {}", settings.naming.prefix);
    println!("Extension: {}", settings.naming.extension);
    match &settings.log_file {
        Some(path) => println!("Log file: {}", path.display()),
        None => println!("Log file: (disabled)"),
    }

    for key in [
        SCRIPTS_DIR_ENV,
        PREFIX_ENV,
        EXTENSION_ENV,
        LOG_FILE_ENV,
        crate::adapters::session_log::LOG_FILTER_ENV,
    ] {
        if let Ok(value) = env::var(key) {
            println!("{}: {}", key, value);
        }
    }
}
