//! Command line handling around a run that needs no network.

use std::collections::HashMap;

use anyhow::Result;
use clap::Parser;
use mirror_cli::cli::{Cli, run_with_env};
use mirror_cli::clients::Endpoints;
use mirror_cli::pipeline::RunOutcome;
use mirror_core::ProcessEnv;
use mirror_core::config::EnvSource;
use mirror_test_utils::fixtures::issue_event;
use mirror_test_utils::{EnvVarGuard, TempWorkspace};

#[test]
fn test_no_document_run_writes_status_output() -> Result<()> {
  let workspace = TempWorkspace::empty()?;
  let event = workspace.write_event(&issue_event(7, None))?;
  let env: HashMap<String, String> = [
    ("GITHUB_EVENT_PATH", event.display().to_string()),
    ("GITHUB_OUTPUT", workspace.output_path().display().to_string()),
    ("GITHUB_WORKSPACE", workspace.root().display().to_string()),
  ]
  .into_iter()
  .map(|(k, v)| (k.to_string(), v))
  .collect();

  let cli = Cli::parse_from(["incident-mirror"]);
  let outcome = run_with_env(&cli, env, Endpoints::single_host("http://127.0.0.1:9"))?;

  assert!(matches!(outcome, RunOutcome::NoDocument { issue_number: 7 }));
  assert_eq!(workspace.read_output(), "status<<MIRROR_EOF\nno-document\nMIRROR_EOF\n");
  Ok(())
}

#[test]
fn test_output_flag_overrides_environment() -> Result<()> {
  let workspace = TempWorkspace::empty()?;
  let event = workspace.write_event(&issue_event(8, Some("nothing linked")))?;
  let explicit = workspace.root().join("explicit_output");

  let cli = Cli::parse_from([
    "incident-mirror",
    "--event-path",
    event.to_str().unwrap(),
    "--output",
    explicit.to_str().unwrap(),
  ]);
  let env: HashMap<String, String> =
    HashMap::from([("GITHUB_OUTPUT".to_string(), workspace.output_path().display().to_string())]);
  run_with_env(&cli, env, Endpoints::default())?;

  assert!(std::fs::read_to_string(&explicit)?.contains("no-document"));
  assert_eq!(workspace.read_output(), "");
  Ok(())
}

#[test]
fn test_malformed_payload_is_rejected() -> Result<()> {
  let workspace = TempWorkspace::empty()?;
  let event = workspace.write_event(&serde_json::json!({ "action": "opened" }))?;

  let cli = Cli::parse_from(["incident-mirror", "--event-path", event.to_str().unwrap()]);
  let err = run_with_env(&cli, HashMap::new(), Endpoints::default()).unwrap_err();
  assert!(err.to_string().contains("issue"), "unexpected error: {err:#}");
  assert_eq!(workspace.read_output(), "");
  Ok(())
}

#[test]
fn test_process_env_reads_real_variables() {
  let mut guard = EnvVarGuard::new();
  guard.set("MIRROR_TEST_PROJECT_NUMBER", " 12 ");
  guard.remove("MIRROR_TEST_UNSET");

  assert_eq!(ProcessEnv.non_blank("MIRROR_TEST_PROJECT_NUMBER").as_deref(), Some("12"));
  assert!(ProcessEnv.require("MIRROR_TEST_UNSET").is_err());
}
