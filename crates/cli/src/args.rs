use crate::parsers;
use clap::{Args as ClapArgs, Parser, ValueHint};
use log_tally_engine::config::{DEFAULT_EXTENSION, DEFAULT_LOG_DIR};
use std::path::PathBuf;

pub const DEFAULT_OUTPUT: &str = "sum_logs.txt";

#[derive(Parser, Debug)]
#[command(
    name = "log_tally",
    version,
    about = "Summarise log levels per request route across a directory of log files"
)]
pub struct Args {
    #[command(flatten)]
    pub scan: ScanOptions,

    #[command(flatten)]
    pub output: OutputOptions,

    /// Directory containing the log files
    #[arg(value_hint = ValueHint::DirPath, default_value = DEFAULT_LOG_DIR)]
    pub log_dir: PathBuf,
}

#[derive(ClapArgs, Debug)]
pub struct ScanOptions {
    /// Suffix that marks a log file (with or without the leading dot)
    #[arg(long, default_value = DEFAULT_EXTENSION, value_parser = parsers::parse_extension, help_heading = "Scan")]
    pub ext: String,

    /// Also scan subdirectories
    #[arg(short, long, help_heading = "Scan")]
    pub recursive: bool,

    /// Worker threads used across files (default: number of CPUs)
    #[arg(short, long, value_parser = parsers::parse_positive_usize, help_heading = "Scan")]
    pub jobs: Option<usize>,
}

#[derive(ClapArgs, Debug)]
pub struct OutputOptions {
    /// Summary file to write
    #[arg(short, long, value_hint = ValueHint::FilePath, default_value = DEFAULT_OUTPUT, help_heading = "Output")]
    pub output: PathBuf,

    /// Only write the summary file; print nothing on stdout
    #[arg(short, long, conflicts_with = "verbose", help_heading = "Output")]
    pub quiet: bool,

    /// Emit debug diagnostics on stderr
    #[arg(short, long, help_heading = "Output")]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults_mirror_original_constants() {
        let args = Args::try_parse_from(["log_tally"]).unwrap();
        assert_eq!(args.log_dir, PathBuf::from("logs"));
        assert_eq!(args.output.output, PathBuf::from("sum_logs.txt"));
        assert_eq!(args.scan.ext, "log");
        assert!(!args.scan.recursive);
        assert_eq!(args.scan.jobs, None);
        assert!(!args.output.quiet);
    }

    #[test]
    fn parses_all_flags() {
        let args = Args::try_parse_from([
            "log_tally", "-r", "-j", "3", "--ext", ".txt", "-o", "out/report.txt", "-q", "var/log",
        ])
        .unwrap();
        assert_eq!(args.log_dir, PathBuf::from("var/log"));
        assert!(args.scan.recursive);
        assert_eq!(args.scan.jobs, Some(3));
        assert_eq!(args.scan.ext, "txt");
        assert_eq!(args.output.output, PathBuf::from("out/report.txt"));
        assert!(args.output.quiet);
    }

    #[test]
    fn rejects_zero_jobs() {
        assert!(Args::try_parse_from(["log_tally", "-j", "0"]).is_err());
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Args::try_parse_from(["log_tally", "-q", "-v"]).is_err());
    }
}
