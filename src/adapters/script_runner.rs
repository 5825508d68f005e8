use crate::domain::error::LaunchFailure;
use crate::domain::{ExecutionRecord, PendingExecution, RunnerMode, ScriptEntry, SessionSummary};
use crate::ports::ScriptRunner;
use crate::summary;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;

const RULE_WIDTH: usize = 40;

pub struct SequentialScriptRunner {
    mode: RunnerMode,
}

struct ChildExit {
    code: Option<i32>,
    stderr: Option<String>,
}

impl SequentialScriptRunner {
    pub fn new(mode: RunnerMode) -> Self {
        Self { mode }
    }

    fn run_one(&self, script: &ScriptEntry, out: &mut dyn Write) -> ExecutionRecord {
        let pending = PendingExecution::start(script);
        let rule = "-".repeat(RULE_WIDTH);
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(
            out,
            "Starting: {} - {}",
            summary::format_time(&pending.started_at()),
            script.file_name
        );
        let _ = writeln!(out, "{rule}");
        let _ = out.flush();
        tracing::info!(script = %script.file_name, mode = ?self.mode, "starting script");

        let result = match self.mode {
            RunnerMode::Streaming => stream_child(&script.path, out),
            RunnerMode::Inherit => inherit_child(&script.path),
        };

        let record = match result {
            Ok(exit) => {
                if exit.code != Some(0) {
                    report_failed_exit(out, &script.file_name, &exit);
                }
                pending.exited(exit.code, exit.stderr)
            }
            Err(failure) => {
                let _ = writeln!(out, "Error: {}", failure);
                pending.failed_to_launch(failure.kind(), failure.to_string())
            }
        };
        let _ = out.flush();
        tracing::info!(
            script = %script.file_name,
            exit_code = ?record.exit_code,
            failure = ?record.failure,
            "script finished"
        );
        record
    }
}

impl Default for SequentialScriptRunner {
    fn default() -> Self {
        Self::new(RunnerMode::default())
    }
}

impl ScriptRunner for SequentialScriptRunner {
    fn run(&self, scripts: &[ScriptEntry], out: &mut dyn Write) -> SessionSummary {
        if scripts.is_empty() {
            return SessionSummary::default();
        }

        let records = scripts
            .iter()
            .map(|script| self.run_one(script, out))
            .collect();
        let summary = SessionSummary::from_records(records);
        let _ = summary::write_ledger(out, &summary);
        let _ = out.flush();
        summary
    }
}

fn report_failed_exit(out: &mut dyn Write, name: &str, exit: &ChildExit) {
    let status = match exit.code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    };
    let _ = writeln!(out, "\nError running {} ({}):", name, status);
    if let Some(stderr) = exit.stderr.as_deref().filter(|text| !text.trim().is_empty()) {
        let _ = write!(out, "{}", stderr);
        if !stderr.ends_with('\n') {
            let _ = writeln!(out);
        }
    }
}

fn stream_child(path: &Path, out: &mut dyn Write) -> Result<ChildExit, LaunchFailure> {
    let mut child = Command::new(path)
        .stdin(Stdio::inherit())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|err| LaunchFailure::classify(path, err))?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let captured = thread::scope(|scope| {
        // Drained on the side so a child that fills the stderr pipe cannot
        // stall the stdout copy below.
        let drain = scope.spawn(move || {
            let mut buffer = Vec::new();
            if let Some(mut stderr) = stderr {
                let _ = stderr.read_to_end(&mut buffer);
            }
            String::from_utf8_lossy(&buffer).into_owned()
        });
        if let Some(stdout) = stdout {
            copy_lines(stdout, out);
        }
        drain.join().unwrap_or_default()
    });

    let status = child
        .wait()
        .map_err(|err| LaunchFailure::classify(path, err))?;
    Ok(ChildExit {
        code: status.code(),
        stderr: Some(captured),
    })
}

fn copy_lines<R: Read>(source: R, out: &mut dyn Write) {
    let mut reader = BufReader::new(source);
    let mut line = Vec::new();
    loop {
        line.clear();
        match reader.read_until(b'\n', &mut line) {
            Ok(0) => break,
            Ok(_) => {
                let _ = out.write_all(&line);
                let _ = out.flush();
            }
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(_) => break,
        }
    }
}

fn inherit_child(path: &Path) -> Result<ChildExit, LaunchFailure> {
    let status = Command::new(path)
        .status()
        .map_err(|err| LaunchFailure::classify(path, err))?;
    Ok(ChildExit {
        code: status.code(),
        stderr: None,
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::domain::FailureKind;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;
    use std::time::Duration;

    fn script(dir: &Path, name: &str, body: &str, mode: u32) -> ScriptEntry {
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
        ScriptEntry::new(name, path, "")
    }

    fn run(runner: &SequentialScriptRunner, scripts: &[ScriptEntry]) -> (SessionSummary, String) {
        let mut out = Vec::new();
        let summary = runner.run(scripts, &mut out);
        (summary, String::from_utf8_lossy(&out).into_owned())
    }

    #[test]
    fn test_run_empty_selection() {
        let (summary, output) = run(&SequentialScriptRunner::default(), &[]);
        assert!(summary.records.is_empty());
        assert_eq!(summary.total_duration, Duration::ZERO);
        assert!(output.is_empty());
    }

    #[test]
    fn test_backup_then_broken_script() {
        let dir = tempfile::tempdir().unwrap();
        let backup = script(dir.path(), "new-backup.sh", "#!/bin/sh\necho done\n", 0o755);
        let broken = script(dir.path(), "new-broken.sh", "#!/bin/sh\necho never\n", 0o644);

        let (summary, output) = run(&SequentialScriptRunner::default(), &[backup, broken]);

        assert_eq!(summary.records.len(), 2);
        assert_eq!(summary.records[0].exit_code, Some(0));
        assert!(summary.records[0].succeeded());
        assert_eq!(summary.records[1].failure, Some(FailureKind::NotExecutable));
        assert_eq!(summary.records[1].exit_code, None);
        assert!(output.contains("done\n"));
        assert!(!output.contains("never"));
        assert!(output.contains("Execution Summary:"));
        assert!(output.contains("- new-backup.sh"));
        assert!(output.contains("- new-broken.sh"));
        assert!(output.contains("Total runtime:"));
    }

    #[test]
    fn test_non_zero_exit_does_not_stop_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let failing = script(
            dir.path(),
            "new-fail.sh",
            "#!/bin/sh\necho partial\necho boom >&2\nexit 3\n",
            0o755,
        );
        let after = script(dir.path(), "new-after.sh", "#!/bin/sh\necho after\n", 0o755);

        let (summary, output) = run(&SequentialScriptRunner::default(), &[failing, after]);

        assert_eq!(summary.records[0].exit_code, Some(3));
        assert_eq!(summary.records[0].failure, Some(FailureKind::NonZeroExit));
        assert_eq!(summary.records[0].error_output.as_deref(), Some("boom\n"));
        assert!(output.contains("Error running new-fail.sh (exit code 3):\nboom\n"));
        assert!(summary.records[1].succeeded());
        assert!(output.contains("after\n"));
        assert_eq!(summary.failure_count(), 1);
    }

    #[test]
    fn test_missing_script_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let ghost = ScriptEntry::new("new-ghost.sh", dir.path().join("new-ghost.sh"), "");

        let (summary, output) = run(&SequentialScriptRunner::default(), &[ghost]);

        assert_eq!(summary.records[0].failure, Some(FailureKind::NotFound));
        assert!(output.contains("Error: Script not found:"));
    }

    #[test]
    fn test_missing_shebang_is_launch_error() {
        let dir = tempfile::tempdir().unwrap();
        let headless = script(dir.path(), "new-headless.sh", "\u{7f}ELF garbage", 0o755);

        let (summary, _) = run(&SequentialScriptRunner::default(), &[headless]);

        assert_eq!(summary.records[0].failure, Some(FailureKind::LaunchError));
    }

    #[test]
    fn test_large_stderr_does_not_deadlock() {
        let dir = tempfile::tempdir().unwrap();
        let noisy = script(
            dir.path(),
            "new-noisy.sh",
            concat!(
                "#!/bin/sh\ni=0\n",
                "while [ $i -lt 4000 ]; do echo 'stderr noise line' >&2; i=$((i+1)); done\n",
                "echo finished\n",
            ),
            0o755,
        );

        let (summary, output) = run(&SequentialScriptRunner::default(), &[noisy]);

        assert!(summary.records[0].succeeded());
        assert!(output.contains("finished\n"));
    }

    #[test]
    fn test_inherit_mode_records_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let quiet = script(dir.path(), "new-quiet.sh", "#!/bin/sh\nexit 2\n", 0o755);

        let (summary, _) = run(&SequentialScriptRunner::new(RunnerMode::Inherit), &[quiet]);

        assert_eq!(summary.records[0].exit_code, Some(2));
        assert_eq!(summary.records[0].error_output, None);
    }

    #[test]
    fn test_records_follow_selection_order() {
        let dir = tempfile::tempdir().unwrap();
        let b = script(dir.path(), "new-b.sh", "#!/bin/sh\necho b\n", 0o755);
        let a = script(dir.path(), "new-a.sh", "#!/bin/sh\necho a\n", 0o755);

        let (summary, output) = run(&SequentialScriptRunner::default(), &[b, a]);

        let names: Vec<PathBuf> = summary.records.iter().map(|r| r.script.path.clone()).collect();
        assert_eq!(names, [dir.path().join("new-b.sh"), dir.path().join("new-a.sh")]);
        assert!(output.find("b\n").unwrap() < output.find("a\n").unwrap());
        assert!(summary.records[0].started_at <= summary.records[1].started_at);
    }
}
