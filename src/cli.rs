// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! NOTE: this expects `clap` to be built with the `derive` feature, e.g.:
//! `clap = { version = "4.5.53", features = ["derive"] }` in `Cargo.toml`.

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};

/// Command-line arguments for `tickrun`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "tickrun",
    version,
    about = "Launch one short-lived worker job per timer tick.",
    long_about = None
)]
pub struct CliArgs {
    /// Seconds between job launches. Must be positive.
    #[arg(value_name = "PERIOD_SECONDS")]
    pub period_sec: u32,

    /// Total number of jobs to launch before exiting. Must be positive.
    #[arg(value_name = "MAX_LAUNCHES")]
    pub max_launches: u32,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TICKRUN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Print the resolved configuration without launching any jobs.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Parse the process arguments.
///
/// clap exits with code 2 on usage errors by default; the launcher's
/// contract is exit code 1 for a wrong argument count or unparsable
/// values, so parse failures are handled here instead.
pub fn parse() -> CliArgs {
    match CliArgs::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            std::process::exit(0);
        }
        Err(err) => {
            let _ = err.print();
            std::process::exit(1);
        }
    }
}
