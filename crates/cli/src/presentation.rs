// crates/cli/src/presentation.rs
use crate::config::CliConfig;
use crate::error::{AppError, Result};
use log_tally_engine::error::EngineError;
use log_tally_engine::progress::ProgressSink;
use log_tally_engine::{AggregateState, LevelCounts, Severity};
use std::fmt::Write as _;
use std::io::Write as _;
use std::path::Path;

const HANDLER_HEADER: &str = "HANDLER";
const TOTAL_LABEL: &str = "Total requests:";

/// Render the summary report.
///
/// One row per route in first-seen order, a column-total row, then the line
/// and database-query totals.
pub fn render(state: &AggregateState) -> String {
    let mut out = String::new();

    let header = Severity::ALL.map(Severity::as_str);
    push_row(&mut out, HANDLER_HEADER, header);

    for (route, counts) in state.table().rows() {
        push_counts(&mut out, route, counts);
    }
    push_counts(&mut out, TOTAL_LABEL, &state.table().column_totals());

    let _ = writeln!(
        out,
        "\nTotal logs processed across all files: {}",
        state.total_lines()
    );
    let _ = writeln!(
        out,
        "\nTotal DEBUG logs with database queries (No route): {}",
        state.db_queries()
    );
    out
}

fn push_counts(out: &mut String, label: &str, counts: &LevelCounts) {
    push_row(out, label, Severity::ALL.map(|level| counts[level]));
}

fn push_row<T: std::fmt::Display>(out: &mut String, label: &str, cells: [T; Severity::COUNT]) {
    let [debug, info, warning, error, critical] = cells;
    let _ = writeln!(
        out,
        "{label:<30} {debug:<10} {info:<10} {warning:<10} {error:<10} {critical:<10}"
    );
}

/// Write the report to the summary file and, unless quiet, to stdout.
///
/// # Errors
///
/// Fails if the summary file (or its parent directory) cannot be written, or
/// stdout is closed.
pub fn write_report(state: &AggregateState, config: &CliConfig) -> Result<()> {
    let report = render(state);
    write_summary_file(&config.output_path, &report)?;
    tracing::debug!(path = %config.output_path.display(), "wrote summary file");

    if !config.quiet {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(report.as_bytes())?;
        stdout.flush()?;
    }
    Ok(())
}

fn write_summary_file(path: &Path, report: &str) -> Result<()> {
    let to_err = |source| AppError::ReportWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(to_err)?;
    }
    std::fs::write(path, report).map_err(to_err)
}

/// Prints `Processing file: NAME` for every merged file.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleProgress {
    quiet: bool,
}

impl ConsoleProgress {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl ProgressSink for ConsoleProgress {
    fn on_file(&self, path: &Path) -> log_tally_engine::error::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let name = path.file_name().unwrap_or(path.as_os_str());
        writeln!(std::io::stdout().lock(), "Processing file: {}", name.to_string_lossy())
            .map_err(EngineError::Progress)
    }

    fn on_complete(&self, files: usize) -> log_tally_engine::error::Result<()> {
        if files == 0 {
            tracing::warn!("no log files found");
        }
        Ok(())
    }
}
