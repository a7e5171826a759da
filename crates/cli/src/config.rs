// crates/cli/src/config.rs
use crate::args::Args;
use crate::error::{AppError, Result};
pub use log_tally_engine::config::{Config, ConfigBuilder};
use std::path::PathBuf;

/// Engine settings plus where and how the report is emitted.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub engine: Config,
    pub output_path: PathBuf,
    pub quiet: bool,
    pub verbose: bool,
}

impl TryFrom<Args> for CliConfig {
    type Error = AppError;

    fn try_from(args: Args) -> Result<Self> {
        let threads = args.scan.jobs.unwrap_or_else(num_cpus::get);

        let engine = ConfigBuilder::default()
            .log_dir(args.log_dir)
            .extension(args.scan.ext)
            .recursive(args.scan.recursive)
            .threads(threads)
            .build()
            .map_err(log_tally_engine::error::EngineError::from)?;

        Ok(Self {
            engine,
            output_path: args.output.output,
            quiet: args.output.quiet,
            verbose: args.output.verbose,
        })
    }
}
