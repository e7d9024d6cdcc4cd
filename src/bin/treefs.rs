//! Treefs CLI Binary
//!
//! Command-line interface for the treefs virtual filesystem.

use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;
use treefs::error::ApiError;
use treefs::logging;
use treefs::tooling::cli::{Cli, CliContext};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let config = cli.load_config().context("loading configuration")?;
    logging::init_logging(Some(&config.logging), &cli.log_overrides())
        .context("initialising logging")?;

    let context = CliContext::new(config, cli.ephemeral).context("opening the store")?;

    match context.execute(&cli.resolved_command()) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(ApiError::CommandFailed(rendered)) => {
            println!("{}", rendered);
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}
