//! `pnmedit` CLI - interactive command editor for Netpbm images.

mod command;
mod config;
mod session;

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::{Args, Config};
use session::{Flow, Session};

fn main() -> ExitCode {
    let config = Config::from(Args::parse());

    // Logs go to stderr; stdout carries only command status lines.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter().into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    if let Err(err) = run(&config) {
        tracing::error!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(config: &Config) -> Result<()> {
    let input: Box<dyn BufRead> = match &config.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open script {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    process(input, &mut out)
}

/// Feed every input line to a fresh session until `EXIT` or end of input.
fn process<R: BufRead, W: Write>(input: R, out: &mut W) -> Result<()> {
    let mut session = Session::new();
    for line in input.lines() {
        let line = line.context("Failed to read command")?;
        let flow = session
            .execute(&line, out)
            .context("Failed to write to stdout")?;
        out.flush().context("Failed to write to stdout")?;
        if flow == Flow::Exit {
            tracing::debug!("exit requested");
            break;
        }
    }
    Ok(())
}
