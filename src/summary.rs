use crate::domain::{ExecutionRecord, SessionSummary};
use chrono::{DateTime, Local};
use std::io::{self, Write};

pub fn format_time(time: &DateTime<Local>) -> String {
    time.format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn write_ledger(out: &mut dyn Write, summary: &SessionSummary) -> io::Result<()> {
    writeln!(out, "{}", "-".repeat(40))?;
    writeln!(out, "Execution Summary:")?;
    for record in &summary.records {
        writeln!(
            out,
            "{} - {} [{}] {:.2}s",
            format_time(&record.started_at),
            record.script.file_name,
            outcome_label(record),
            record.duration().as_secs_f64()
        )?;
    }
    if let Some(last) = summary.records.last() {
        writeln!(out, "{} - Finished running scripts", format_time(&last.ended_at))?;
    }
    writeln!(
        out,
        "Total runtime: {:.2} seconds.",
        summary.total_duration.as_secs_f64()
    )?;
    Ok(())
}

/// One-line digest for the session log.
pub fn digest(summary: &SessionSummary) -> String {
    format!(
        "Session finished: {} script(s), {} failed, {:.2}s",
        summary.records.len(),
        summary.failure_count(),
        summary.total_duration.as_secs_f64()
    )
}

/// Lines for the session log: the digest, then one line per failed script
/// carrying the last line of its error output.
pub fn log_lines(summary: &SessionSummary) -> Vec<String> {
    let mut lines = vec![digest(summary)];
    for record in summary.records.iter().filter(|record| !record.succeeded()) {
        let detail = record
            .error_output
            .as_deref()
            .and_then(|text| text.lines().rev().find(|line| !line.trim().is_empty()))
            .unwrap_or("no error output");
        lines.push(format!(
            "{} {}: {}",
            record.script.file_name,
            outcome_label(record),
            detail.trim()
        ));
    }
    lines
}

fn outcome_label(record: &ExecutionRecord) -> String {
    match (record.failure, record.exit_code) {
        (None, _) => "ok".to_string(),
        (Some(kind), Some(code)) => format!("{} ({})", kind.label(), code),
        (Some(kind), None) => kind.label().to_string(),
    }
}
