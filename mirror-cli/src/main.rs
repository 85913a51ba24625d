//! # Incident Mirror Entry Point
//!
//! Runs one mirror pass for the issue event the workflow was triggered by.

use std::process::ExitCode;

use clap::Parser;
use mirror_cli::cli::{Cli, handle_cli};
use mirror_core::output::print_error;
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> ExitCode {
  let cmd = Cli::parse();

  // The action runs unattended, so INFO is the floor
  let level = match cmd.verbose {
    0 => tracing::Level::INFO,
    1 => tracing::Level::DEBUG,
    _ => tracing::Level::TRACE,
  };

  tracing_subscriber::registry()
    .with(fmt::layer().with_target(false))
    .with(EnvFilter::from_default_env().add_directive(level.into()))
    .init();

  debug!("Tracing initialized with level: {}", level);

  match handle_cli(cmd) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{err:#}"));
      ExitCode::FAILURE
    }
  }
}
