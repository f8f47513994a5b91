//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `redirect_status` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output
//!
//! All core functionality is implemented in the library crate.

use std::io::IsTerminal;
use std::process;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use redirect_status::initialization::init_logger_with;
use redirect_status::{run, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments into Config
    let config = Config::parse();

    // Initialize logger based on config
    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    // Redirects are only accepted on a pipe; an interactive terminal on
    // stdin means the user wants usage, not a blocking read.
    if std::io::stdin().is_terminal() {
        Config::command().print_help()?;
        return Ok(());
    }

    match run(config).await {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(e) => {
            eprintln!("redirect_status error: {:#}", e);
            process::exit(1);
        }
    }
}
