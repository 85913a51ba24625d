//! Failure taxonomy for a mirror run.
//!
//! Fatal failures travel as `anyhow::Error` wrapping a [`MirrorError`] so the
//! binary can tell configuration problems from upstream ones. Best-effort
//! failures during project sync never become errors; see the sync report in
//! the CLI crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MirrorError {
  /// A required environment variable or file is missing, blank or invalid.
  #[error("Configuration error: {variable} {reason}")]
  Configuration { variable: String, reason: String },

  /// The trigger payload is missing or lacks a required field.
  #[error("Invalid event payload: {0}")]
  Payload(String),

  /// A third-party API answered with a failure.
  #[error("{service} request failed{}: {body}", status_suffix(.status))]
  Upstream {
    service: String,
    status: Option<u16>,
    body: String,
  },
}

fn status_suffix(status: &Option<u16>) -> String {
  match status {
    Some(code) => format!(" with HTTP {code}"),
    None => String::new(),
  }
}

impl MirrorError {
  pub fn missing(variable: &str) -> Self {
    Self::Configuration {
      variable: variable.to_string(),
      reason: "is not set".to_string(),
    }
  }

  pub fn invalid(variable: &str, reason: impl Into<String>) -> Self {
    Self::Configuration {
      variable: variable.to_string(),
      reason: reason.into(),
    }
  }

  pub fn upstream(service: &str, status: Option<u16>, body: impl Into<String>) -> Self {
    Self::Upstream {
      service: service.to_string(),
      status,
      body: body.into(),
    }
  }

  /// True for errors raised before any network call.
  pub const fn is_configuration(&self) -> bool {
    matches!(self, Self::Configuration { .. })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_configuration_message_names_variable() {
    let err = MirrorError::missing("GCP_CLIENT_ID");
    assert_eq!(err.to_string(), "Configuration error: GCP_CLIENT_ID is not set");
    assert!(err.is_configuration());
  }

  #[test]
  fn test_upstream_message_carries_status_and_body() {
    let err = MirrorError::upstream("Google Drive export", Some(404), r#"{"error":"notFound"}"#);
    assert_eq!(
      err.to_string(),
      r#"Google Drive export request failed with HTTP 404: {"error":"notFound"}"#
    );
    assert!(!err.is_configuration());
  }

  #[test]
  fn test_upstream_message_without_status() {
    let err = MirrorError::upstream("GitHub GraphQL", None, "Could not resolve to a ProjectV2");
    assert_eq!(
      err.to_string(),
      "GitHub GraphQL request failed: Could not resolve to a ProjectV2"
    );
  }
}
