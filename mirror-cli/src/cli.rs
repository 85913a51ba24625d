//! # Command Line Interface
//!
//! Arguments of the `incident-mirror` binary and the handler that runs the
//! pipeline once and reports the outcome to the job log and step outputs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Parser, ValueEnum};
use mirror_core::consts::{DEFAULT_TEMPLATE_PATH, ENV_EVENT_PATH, ENV_OUTPUT, ENV_WORKSPACE};
use mirror_core::output::{output_path, print_info, print_success, print_warning};
use mirror_core::{EnvSource, MirrorError, ProcessEnv};
use serde_json::Value;
use tokio::runtime::Runtime;
use tracing::{debug, info};

use crate::clients::Endpoints;
use crate::pipeline::{Pipeline, RunOutcome};

/// Enum representing different color modes for output
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
  /// Enable colored output
  Always,
  /// Automatically detect if colors should be used based on terminal
  /// capabilities
  Auto,
  /// Disable colored output
  Never,
}

/// Mirror a Google Doc incident report linked from an issue
#[derive(Parser, Debug)]
#[command(name = "incident-mirror")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(about = "Mirror a Google Doc incident report into a central repository and project board")]
#[command(
  long_about = "Reads the issue event that triggered the workflow, fetches the Google Doc linked from\n\
        the issue description, and creates a mirrored issue in the configured target repository.\n\
        The mirrored issue is then added to a Projects board and its fields are filled from the\n\
        incident report.\n\n\
        Credentials and targets come from the environment: GCP_CLIENT_ID, GCP_CLIENT_SECRET,\n\
        GCP_REFRESH_TOKEN, TARGET_REPO_OWNER, TARGET_REPO_NAME, TARGET_REPO_TOKEN and\n\
        PROJECT_NUMBER."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show debug level messages\n\
             -vv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(long, value_enum, ignore_case = true, default_value_t = ColorMode::Auto)]
  pub colors: ColorMode,

  /// Event payload file [default: $GITHUB_EVENT_PATH]
  #[arg(long, value_name = "FILE")]
  pub event_path: Option<PathBuf>,

  /// Workspace root the template path is resolved against
  /// [default: $GITHUB_WORKSPACE or the current directory]
  #[arg(long, value_name = "DIR")]
  pub workspace: Option<PathBuf>,

  /// Issue body template, relative to the workspace unless absolute
  #[arg(long, value_name = "FILE", default_value = DEFAULT_TEMPLATE_PATH)]
  pub template: PathBuf,

  /// Step output file [default: $GITHUB_OUTPUT]
  #[arg(long, value_name = "FILE")]
  pub output: Option<PathBuf>,
}

/// Resolve the event file from the flag or the runner environment.
pub fn event_path(cli: &Cli, env: &impl EnvSource) -> Result<PathBuf, MirrorError> {
  match &cli.event_path {
    Some(path) => Ok(path.clone()),
    None => env.require(ENV_EVENT_PATH).map(PathBuf::from),
  }
}

/// Resolve the template file against the workspace root.
pub fn template_path(cli: &Cli, env: &impl EnvSource) -> Result<PathBuf> {
  if cli.template.is_absolute() {
    return Ok(cli.template.clone());
  }
  let root = match (&cli.workspace, env.non_blank(ENV_WORKSPACE)) {
    (Some(dir), _) => dir.clone(),
    (None, Some(dir)) => PathBuf::from(dir),
    (None, None) => std::env::current_dir().context("Failed to determine the current directory")?,
  };
  Ok(root.join(&cli.template))
}

/// Read and parse the event payload.
pub fn read_event(path: &Path) -> Result<Value, MirrorError> {
  debug!("Reading event payload from {}", path.display());
  let raw = std::fs::read_to_string(path)
    .map_err(|e| MirrorError::Payload(format!("cannot read {}: {e}", path.display())))?;
  serde_json::from_str(&raw).map_err(|e| MirrorError::Payload(format!("{} is not valid JSON: {e}", path.display())))
}

/// Run the pipeline with settings from `env` and report the outcome.
pub fn run_with_env<E: EnvSource>(cli: &Cli, env: E, endpoints: Endpoints) -> Result<RunOutcome> {
  let payload = read_event(&event_path(cli, &env)?)?;
  let template = template_path(cli, &env)?;
  let outputs_to = output_path(cli.output.clone(), env.get(ENV_OUTPUT));

  let rt = Runtime::new().context("Failed to create async runtime")?;
  let pipeline = Pipeline::new(env, endpoints, template);
  let outcome = rt.block_on(pipeline.run(&payload))?;

  report(&outcome);

  let outputs = outcome.outputs()?;
  match outputs_to {
    Some(path) => outputs.write_to(&path)?,
    None => debug!("No step output file configured"),
  }
  Ok(outcome)
}

fn report(outcome: &RunOutcome) {
  match outcome {
    RunOutcome::NoDocument { issue_number } => {
      print_warning(&format!(
        "Issue #{issue_number} does not link a Google Doc incident report; nothing was mirrored"
      ));
    }
    RunOutcome::Mirrored(run) => {
      if let Ok(json) = run.details.to_json() {
        info!("Incident details: {}", json);
      }
      print_success(&format!(
        "Issue #{} mirrored to {}",
        run.issue_number, run.mirror.url
      ));
      if let Some(warning) = run.mirror.back_link_warning() {
        print_warning(&warning);
      }
      for warning in run.sync.warnings() {
        print_warning(&warning);
      }
      if let Some(item_id) = &run.sync.item_id {
        print_info(&format!(
          "Project item {} updated ({} fields written)",
          item_id,
          run.sync.written()
        ));
      }
    }
  }
}

/// Handle the parsed command line against the real process environment.
pub fn handle_cli(cli: Cli) -> Result<()> {
  match cli.colors {
    ColorMode::Always => owo_colors::set_override(true),
    ColorMode::Never => owo_colors::set_override(false),
    ColorMode::Auto => {}
  }

  let endpoints = Endpoints::from_env(&ProcessEnv);
  run_with_env(&cli, ProcessEnv, endpoints).map(|_| ())
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use clap::CommandFactory;

  use super::*;

  fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
  }

  #[test]
  fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_verbosity_counts() {
    let cli = Cli::parse_from(["incident-mirror", "-vv"]);
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.colors, ColorMode::Auto);
  }

  #[test]
  fn test_event_path_flag_beats_env() {
    let cli = Cli::parse_from(["incident-mirror", "--event-path", "/tmp/flag.json"]);
    let path = event_path(&cli, &env(&[(ENV_EVENT_PATH, "/tmp/env.json")])).unwrap();
    assert_eq!(path, PathBuf::from("/tmp/flag.json"));
  }

  #[test]
  fn test_missing_event_path_is_configuration_error() {
    let cli = Cli::parse_from(["incident-mirror"]);
    let err = event_path(&cli, &env(&[])).unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains(ENV_EVENT_PATH));
  }

  #[test]
  fn test_template_resolved_against_workspace() {
    let cli = Cli::parse_from(["incident-mirror"]);
    let path = template_path(&cli, &env(&[(ENV_WORKSPACE, "/home/runner/work/repo")])).unwrap();
    assert_eq!(path, PathBuf::from("/home/runner/work/repo/templates/mirrored-incident.md"));

    let cli = Cli::parse_from(["incident-mirror", "--workspace", "/src", "--template", "t.md"]);
    let path = template_path(&cli, &env(&[(ENV_WORKSPACE, "/ignored")])).unwrap();
    assert_eq!(path, PathBuf::from("/src/t.md"));
  }

  #[test]
  fn test_read_event_rejects_garbage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("event.json");
    std::fs::write(&path, "not json").unwrap();
    assert!(matches!(read_event(&path), Err(MirrorError::Payload(_))));
    assert!(matches!(read_event(&dir.path().join("missing.json")), Err(MirrorError::Payload(_))));
  }
}
