use chrono::Local;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

pub const LOG_FILTER_ENV: &str = "PICKRUN_LOG";

/// Append-only diagnostic file for faults that must not interrupt the
/// interactive session.
#[derive(Debug, Clone, Default)]
pub struct SessionLog {
    path: Option<PathBuf>,
}

impl SessionLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn append(&self, message: &str) {
        let Some(path) = self.path.as_deref() else {
            return;
        };
        let line = format!(
            "{}: {}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            message
        );
        let _ = open_append(path).and_then(|mut file| file.write_all(line.as_bytes()));
    }

    fn writer(&self) -> Box<dyn Write> {
        match self.path.as_deref().map(open_append) {
            Some(Ok(file)) => Box::new(file),
            _ => Box::new(io::sink()),
        }
    }
}

fn open_append(path: &Path) -> io::Result<std::fs::File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Route `tracing` events into the session log file.
pub fn init_tracing(log: &SessionLog) {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let sink = log.clone();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .with_writer(move || sink.writer())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_append_writes_timestamped_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("debug.log");
        let log = SessionLog::new(path.clone());

        log.append("Scripts found: 2");
        log.append("Curses error: resize");

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(": Scripts found: 2"));
        assert!(lines[1].ends_with(": Curses error: resize"));
        // "YYYY-MM-DD HH:MM:SS.mmm" prefix
        assert_eq!(lines[0].find(": Scripts").unwrap(), 23);
    }

    #[test]
    fn test_append_to_unwritable_path_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let log = SessionLog::new(dir.path().join("missing").join("debug.log"));
        log.append("ignored");
        assert!(!dir.path().join("missing").exists());
    }

    #[test]
    fn test_disabled_log_is_noop() {
        let log = SessionLog::disabled();
        assert!(log.path().is_none());
        log.append("ignored");
    }
}
