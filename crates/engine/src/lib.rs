// crates/engine/src/lib.rs
use rayon::prelude::*;
use std::path::PathBuf;

pub mod classifier;
pub mod config;
pub mod error;
pub mod filesystem;
pub mod processor;
pub mod progress;
pub mod severity;
pub mod stats;
pub mod table;

pub use crate::classifier::{ClassifiedLine, NO_ROUTE, classify};
pub use crate::severity::Severity;
pub use crate::stats::{AggregateState, FilePartial, FileTally};
pub use crate::table::{CountTable, LevelCounts};

use crate::config::Config;
use crate::error::{EngineError, Result};
use crate::progress::{NoProgress, ProgressSink};

/// Run one batch over the configured log directory.
///
/// # Errors
///
/// Any I/O failure (missing directory, unreadable file) aborts the batch.
pub fn run(config: &Config) -> Result<AggregateState> {
    run_with_progress(config, &NoProgress)
}

/// Run one batch, reporting each file to `progress` as it is merged.
///
/// Files are tallied on up to `config.threads` threads, then merged one by one
/// in sorted path order, so the result does not depend on the thread count.
///
/// # Errors
///
/// Any I/O failure aborts the batch; no partial state is returned.
pub fn run_with_progress(config: &Config, progress: &dyn ProgressSink) -> Result<AggregateState> {
    let files = filesystem::discover_log_files(config)?;
    tracing::debug!(
        dir = %config.log_dir.display(),
        files = files.len(),
        threads = config.threads,
        "discovered log files"
    );

    let partials = tally_files(&files, config.threads)?;

    let mut state = AggregateState::new();
    for partial in partials {
        progress.on_file(&partial.path)?;
        state.merge_partial(partial);
    }
    progress.on_complete(state.files().len())?;

    tracing::info!(
        files = state.files().len(),
        lines = state.total_lines(),
        classified = state.classified_lines(),
        routes = state.table().len(),
        db_queries = state.db_queries(),
        "batch complete"
    );
    Ok(state)
}

fn tally_files(files: &[PathBuf], threads: usize) -> Result<Vec<FilePartial>> {
    if threads <= 1 || files.len() < 2 {
        return files.iter().map(|path| processor::process_file(path)).collect();
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| EngineError::ThreadPool {
            details: e.to_string(),
        })?;

    pool.install(|| {
        files
            .par_iter()
            .map(|path| processor::process_file(path))
            .collect()
    })
}
