//! # Output
//!
//! Status lines for the job log and step outputs for downstream workflow
//! steps.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use tracing::debug;

/// Helper function to safely get an emoji or fallback to a default character
pub fn get_emoji_or_default(name: &str, default: &str) -> String {
  match emojis::get_by_shortcode(name) {
    Some(emoji) => emoji.to_string(),
    None => default.to_string(),
  }
}

/// Print a success message
pub fn print_success(message: &str) {
  let check = get_emoji_or_default("check_mark", "✓");
  println!("{} {}", check.green().bold(), message);
}

/// Print an error message and raise an `::error::` annotation
pub fn print_error(message: &str) {
  let cross = get_emoji_or_default("cross_mark", "✗");
  eprintln!("{} {}", cross.red().bold(), message);
  println!("{}", workflow_command("error", message));
}

/// Print a warning message and raise a `::warning::` annotation
pub fn print_warning(message: &str) {
  let warning = get_emoji_or_default("warning", "⚠");
  println!("{} {}", warning.yellow().bold(), message);
  println!("{}", workflow_command("warning", message));
}

/// Print an info message
pub fn print_info(message: &str) {
  let info = get_emoji_or_default("information", "ℹ");
  println!("{} {}", info.blue().bold(), message);
}

/// Format a workflow command, escaping the characters the runner treats
/// specially in command data.
pub fn workflow_command(command: &str, message: &str) -> String {
  let escaped = message.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A");
  format!("::{command}::{escaped}")
}

/// Step outputs collected during a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StepOutputs {
  entries: Vec<(String, String)>,
}

impl StepOutputs {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
    let name = name.into();
    let value = value.into();
    match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
      Some(entry) => entry.1 = value,
      None => self.entries.push((name, value)),
    }
  }

  pub fn get(&self, name: &str) -> Option<&str> {
    self
      .entries
      .iter()
      .find(|(existing, _)| existing == name)
      .map(|(_, value)| value.as_str())
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Render the outputs in the runner's `name<<DELIMITER` block form.
  pub fn render(&self) -> String {
    let mut rendered = String::new();
    for (name, value) in &self.entries {
      let delimiter = delimiter_for(value);
      rendered.push_str(&format!("{name}<<{delimiter}\n{value}\n{delimiter}\n"));
    }
    rendered
  }

  /// Append the outputs to the file named by `GITHUB_OUTPUT`.
  pub fn write_to(&self, path: &Path) -> Result<()> {
    debug!("Writing {} step outputs to {}", self.entries.len(), path.display());
    let mut file = OpenOptions::new()
      .create(true)
      .append(true)
      .open(path)
      .with_context(|| format!("Failed to open output file {}", path.display()))?;
    file
      .write_all(self.render().as_bytes())
      .with_context(|| format!("Failed to write output file {}", path.display()))
  }
}

/// Pick a heredoc delimiter that does not occur in `value`.
fn delimiter_for(value: &str) -> String {
  let mut delimiter = "MIRROR_EOF".to_string();
  let mut attempt = 0;
  while value.lines().any(|line| line == delimiter) {
    attempt += 1;
    delimiter = format!("MIRROR_EOF_{attempt}");
  }
  delimiter
}

/// Where step outputs go, if anywhere.
pub fn output_path(explicit: Option<PathBuf>, env_value: Option<String>) -> Option<PathBuf> {
  explicit.or_else(|| env_value.filter(|v| !v.trim().is_empty()).map(PathBuf::from))
}
