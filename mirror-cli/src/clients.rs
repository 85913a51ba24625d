//! # Client Creation
//!
//! Centralized creation of the GitHub and Google clients a run needs, with
//! endpoint overrides taken from the runner environment.

use anyhow::{Context, Result};
use mirror_core::consts::{ENV_GITHUB_API_URL, ENV_GITHUB_GRAPHQL_URL};
use mirror_core::{DocsCredentials, EnvSource, MirrorTarget};
use mirror_gdocs::{GoogleDocsClient, create_docs_client};
use mirror_gh::{GitHubClient, create_github_client};

/// Base URLs of every upstream the pipeline talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
  pub github_api: String,
  pub github_graphql: String,
  pub google_token: String,
  pub google_drive: String,
}

impl Default for Endpoints {
  fn default() -> Self {
    Self {
      github_api: mirror_gh::consts::API_BASE_URL.to_string(),
      github_graphql: mirror_gh::consts::GRAPHQL_URL.to_string(),
      google_token: mirror_gdocs::consts::TOKEN_URL.to_string(),
      google_drive: mirror_gdocs::consts::DRIVE_BASE_URL.to_string(),
    }
  }
}

impl Endpoints {
  /// Public endpoints, with the GitHub ones replaced by `GITHUB_API_URL` and
  /// `GITHUB_GRAPHQL_URL` when the runner sets them.
  pub fn from_env(env: &impl EnvSource) -> Self {
    let defaults = Self::default();
    Self {
      github_api: env.non_blank(ENV_GITHUB_API_URL).unwrap_or(defaults.github_api),
      github_graphql: env.non_blank(ENV_GITHUB_GRAPHQL_URL).unwrap_or(defaults.github_graphql),
      ..defaults
    }
  }

  /// Every endpoint rooted at one server, as used by end-to-end tests.
  pub fn single_host(base: &str) -> Self {
    let base = base.trim_end_matches('/');
    Self {
      github_api: base.to_string(),
      github_graphql: format!("{base}/graphql"),
      google_token: format!("{base}/token"),
      google_drive: format!("{base}/drive/v3"),
    }
  }
}

/// Creates the client that writes to the target repository and board.
pub fn create_target_client(target: &MirrorTarget, endpoints: &Endpoints) -> Result<GitHubClient> {
  Ok(
    create_github_client(&target.token)
      .context("Failed to create GitHub client for the target repository")?
      .with_urls(&endpoints.github_api, &endpoints.github_graphql),
  )
}

/// Creates the client that comments on the source issue.
pub fn create_source_client(target: &MirrorTarget, endpoints: &Endpoints) -> Result<GitHubClient> {
  Ok(
    create_github_client(&target.source_token)
      .context("Failed to create GitHub client for the source repository")?
      .with_urls(&endpoints.github_api, &endpoints.github_graphql),
  )
}

/// Creates the Drive export client.
pub fn create_google_client(credentials: DocsCredentials, endpoints: &Endpoints) -> GoogleDocsClient {
  create_docs_client(credentials).with_urls(&endpoints.google_token, &endpoints.google_drive)
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use super::*;

  #[test]
  fn test_endpoints_default_to_public_hosts() {
    let endpoints = Endpoints::from_env(&HashMap::new());
    assert_eq!(endpoints, Endpoints::default());
    assert_eq!(endpoints.github_api, "https://api.github.com");
  }

  #[test]
  fn test_endpoints_follow_runner_overrides() {
    let env: HashMap<String, String> = [
      (ENV_GITHUB_API_URL.to_string(), "https://ghe.example.com/api/v3".to_string()),
      (ENV_GITHUB_GRAPHQL_URL.to_string(), "https://ghe.example.com/api/graphql".to_string()),
    ]
    .into_iter()
    .collect();

    let endpoints = Endpoints::from_env(&env);
    assert_eq!(endpoints.github_api, "https://ghe.example.com/api/v3");
    assert_eq!(endpoints.github_graphql, "https://ghe.example.com/api/graphql");
    assert_eq!(endpoints.google_token, "https://oauth2.googleapis.com/token");
  }

  #[test]
  fn test_single_host() {
    let endpoints = Endpoints::single_host("http://127.0.0.1:8080/");
    assert_eq!(endpoints.github_graphql, "http://127.0.0.1:8080/graphql");
    assert_eq!(endpoints.google_drive, "http://127.0.0.1:8080/drive/v3");
  }
}
