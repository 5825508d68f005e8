pub mod error;
pub mod layout;

use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

pub const NO_DESCRIPTION: &str = "No description available.";

const COMMENT_MARKER: &str = "#";
const INTERPRETER_DIRECTIVE: &str = "#!";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptEntry {
    pub file_name: String,
    pub path: PathBuf,
    pub description: String,
    #[serde(skip)]
    pub selected: bool,
}

impl ScriptEntry {
    pub fn new(
        file_name: impl Into<String>,
        path: PathBuf,
        description: impl Into<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            path,
            description: description.into(),
            selected: false,
        }
    }
}

/// Filters catalog candidates by file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingConvention {
    pub prefix: String,
    pub extension: String,
}

impl NamingConvention {
    pub fn new(prefix: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            extension: extension.into(),
        }
    }

    pub fn matches(&self, file_name: &str) -> bool {
        file_name.starts_with(&self.prefix) && file_name.ends_with(&self.extension)
    }
}

impl Default for NamingConvention {
    fn default() -> Self {
        Self::new("new", ".sh")
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SelectionMode {
    Single,
    #[default]
    Multi,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum RunnerMode {
    /// Pipe stdout through the runner line by line and capture stderr.
    #[default]
    Streaming,
    /// Hand the terminal to the child untouched.
    Inherit,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FailureKind {
    NonZeroExit,
    NotFound,
    NotExecutable,
    LaunchError,
}

impl FailureKind {
    pub fn label(&self) -> &'static str {
        match self {
            FailureKind::NonZeroExit => "failed",
            FailureKind::NotFound => "not found",
            FailureKind::NotExecutable => "not executable",
            FailureKind::LaunchError => "launch error",
        }
    }
}

/// A script whose child process has been started but not yet reaped.
#[derive(Debug)]
pub struct PendingExecution {
    script: ScriptEntry,
    started_at: DateTime<Local>,
}

impl PendingExecution {
    pub fn start(script: &ScriptEntry) -> Self {
        Self {
            script: script.clone(),
            started_at: Local::now(),
        }
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    pub fn exited(self, exit_code: Option<i32>, error_output: Option<String>) -> ExecutionRecord {
        let failure = match exit_code {
            Some(0) => None,
            _ => Some(FailureKind::NonZeroExit),
        };
        self.finish(exit_code, failure, error_output)
    }

    pub fn failed_to_launch(self, kind: FailureKind, message: String) -> ExecutionRecord {
        self.finish(None, Some(kind), Some(message))
    }

    fn finish(
        self,
        exit_code: Option<i32>,
        failure: Option<FailureKind>,
        error_output: Option<String>,
    ) -> ExecutionRecord {
        ExecutionRecord {
            script: self.script,
            started_at: self.started_at,
            ended_at: Local::now(),
            exit_code,
            failure,
            error_output,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExecutionRecord {
    pub script: ScriptEntry,
    pub started_at: DateTime<Local>,
    pub ended_at: DateTime<Local>,
    pub exit_code: Option<i32>,
    pub failure: Option<FailureKind>,
    pub error_output: Option<String>,
}

impl ExecutionRecord {
    pub fn succeeded(&self) -> bool {
        self.failure.is_none()
    }

    pub fn duration(&self) -> Duration {
        (self.ended_at - self.started_at).to_std().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionSummary {
    pub records: Vec<ExecutionRecord>,
    pub total_duration: Duration,
}

impl SessionSummary {
    /// Builds a summary whose duration is the wall-clock span of the records.
    pub fn from_records(records: Vec<ExecutionRecord>) -> Self {
        let total_duration = match (records.first(), records.last()) {
            (Some(first), Some(last)) => (last.ended_at - first.started_at)
                .to_std()
                .unwrap_or_default(),
            _ => Duration::ZERO,
        };
        Self {
            records,
            total_duration,
        }
    }

    pub fn failure_count(&self) -> usize {
        self.records.iter().filter(|record| !record.succeeded()).count()
    }
}

/// Returns the first comment line of a script, skipping the interpreter
/// directive on line one. `Ok(None)` means the file has no such comment.
pub fn first_comment_line<I, E>(lines: I) -> Result<Option<String>, E>
where
    I: IntoIterator<Item = Result<String, E>>,
{
    for (index, line) in lines.into_iter().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if index == 0 && trimmed.starts_with(INTERPRETER_DIRECTIVE) {
            continue;
        }
        if let Some(comment) = trimmed.strip_prefix(COMMENT_MARKER) {
            return Ok(Some(comment.trim().to_string()));
        }
    }
    Ok(None)
}
