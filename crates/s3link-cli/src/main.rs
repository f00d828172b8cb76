#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod command;
mod config;

use std::{io, process};

use crate::command::Outcome;
use crate::config::Cli;

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "s3link_cli::startup";
pub const TRACING_TARGET_CONFIG: &str = "s3link_cli::config";
pub const TRACING_TARGET_COMMAND: &str = "s3link_cli::command";

#[tokio::main]
async fn main() {
    let error = match run().await {
        Ok(outcome) => process::exit(outcome.exit_code()),
        Err(error) => error,
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_COMMAND,
            error = %format!("{error:#}"),
            "command failed"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<Outcome> {
    let cli = Cli::init();

    Cli::init_tracing()?;
    cli.log();
    cli.validate()?;

    let api = cli.api()?;
    cli.command.execute(&api, &mut io::stdout()).await
}
