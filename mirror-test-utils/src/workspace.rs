//! Temporary runner workspace for testing
//!
//! Lays out what a runner gives the action: a checkout containing the issue
//! template, an event payload file and a step output file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tempfile::TempDir;

/// Template path inside the workspace, matching the production default
pub const TEMPLATE_RELATIVE_PATH: &str = "templates/mirrored-incident.md";

/// A temporary directory standing in for `GITHUB_WORKSPACE`
pub struct TempWorkspace {
  /// The temporary directory backing the workspace
  pub temp_dir: TempDir,
}

impl TempWorkspace {
  /// Create a workspace holding `template` at the default template path
  pub fn with_template(template: &str) -> Result<Self> {
    let temp_dir = TempDir::new().context("Failed to create temporary directory")?;
    let template_path = temp_dir.path().join(TEMPLATE_RELATIVE_PATH);
    if let Some(parent) = template_path.parent() {
      fs::create_dir_all(parent).context("Failed to create template directory")?;
    }
    fs::write(&template_path, template).context("Failed to write template")?;
    Ok(Self { temp_dir })
  }

  /// Create a workspace without any template
  pub fn empty() -> Result<Self> {
    Ok(Self {
      temp_dir: TempDir::new().context("Failed to create temporary directory")?,
    })
  }

  pub fn root(&self) -> &Path {
    self.temp_dir.path()
  }

  pub fn template_path(&self) -> PathBuf {
    self.root().join(TEMPLATE_RELATIVE_PATH)
  }

  /// Write `payload` as the event file and return its path
  pub fn write_event(&self, payload: &Value) -> Result<PathBuf> {
    let path = self.root().join("event.json");
    fs::write(&path, serde_json::to_vec_pretty(payload)?).context("Failed to write event payload")?;
    Ok(path)
  }

  /// Path of the step output file (not created until something writes it)
  pub fn output_path(&self) -> PathBuf {
    self.root().join("github_output")
  }

  /// Contents of the step output file, or an empty string
  pub fn read_output(&self) -> String {
    fs::read_to_string(self.output_path()).unwrap_or_default()
  }
}
