//! Runtime configuration for the `pnmedit` binary.

use std::path::PathBuf;

use clap::Parser;

/// Edit Netpbm images with line-oriented commands.
///
/// Commands are read one per line from standard input, or from a script file.
/// Status lines go to standard output and logs to standard error.
#[derive(Parser, Debug)]
#[command(name = "pnmedit")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Read commands from this file instead of standard input.
    #[arg(short, long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Settings the editor runs with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Command script; `None` reads standard input.
    pub script: Option<PathBuf>,
    pub verbose: bool,
}

impl Config {
    /// Default `tracing` filter when `RUST_LOG` is not set.
    pub fn log_filter(&self) -> String {
        let level = if self.verbose { "debug" } else { "warn" };
        format!("pnmedit={level}")
    }
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            script: args.script,
            verbose: args.verbose,
        }
    }
}
