// crates/cli/src/lib.rs
pub mod args;
pub mod config;
pub mod error;
pub mod parsers;
pub mod presentation;

use crate::config::CliConfig;
use crate::error::Result;
use crate::presentation::ConsoleProgress;

/// Run one batch and emit its report.
///
/// Nothing is written when the batch fails.
///
/// # Errors
///
/// Propagates engine I/O failures and report write failures.
pub fn run(config: &CliConfig) -> Result<()> {
    let progress = ConsoleProgress::new(config.quiet);
    let state = log_tally_engine::run_with_progress(&config.engine, &progress)?;
    presentation::write_report(&state, config)
}
