//! # Configuration
//!
//! Environment-driven settings for the document fetch and mirror phases.
//! Every phase loads its own settings right before it needs them so that a
//! missing variable is reported before that phase touches the network.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::consts::{
  ENV_GCP_CLIENT_ID, ENV_GCP_CLIENT_SECRET, ENV_GCP_REFRESH_TOKEN, ENV_GITHUB_TOKEN, ENV_PROJECT_NUMBER,
  ENV_PROJECT_OWNER_TYPE, ENV_SOURCE_REPO_TOKEN, ENV_TARGET_REPO_NAME, ENV_TARGET_REPO_OWNER, ENV_TARGET_REPO_TOKEN,
};
use crate::error::MirrorError;

/// Read access to environment-style key/value settings.
pub trait EnvSource {
  fn get(&self, key: &str) -> Option<String>;

  /// Returns the trimmed value, treating blank values as unset.
  fn non_blank(&self, key: &str) -> Option<String> {
    self
      .get(key)
      .map(|value| value.trim().to_string())
      .filter(|value| !value.is_empty())
  }

  fn require(&self, key: &str) -> Result<String, MirrorError> {
    self.non_blank(key).ok_or_else(|| MirrorError::missing(key))
  }
}

/// The real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
  fn get(&self, key: &str) -> Option<String> {
    std::env::var(key).ok()
  }
}

impl EnvSource for HashMap<String, String> {
  fn get(&self, key: &str) -> Option<String> {
    HashMap::get(self, key).cloned()
  }
}

/// OAuth client credentials used to export the incident document.
#[derive(Clone, PartialEq, Eq)]
pub struct DocsCredentials {
  pub client_id: String,
  pub client_secret: String,
  pub refresh_token: String,
}

impl fmt::Debug for DocsCredentials {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("DocsCredentials")
      .field("client_id", &self.client_id)
      .field("client_secret", &"<redacted>")
      .field("refresh_token", &"<redacted>")
      .finish()
  }
}

impl DocsCredentials {
  pub fn from_env(env: &impl EnvSource) -> Result<Self, MirrorError> {
    let creds = Self {
      client_id: env.require(ENV_GCP_CLIENT_ID)?,
      client_secret: env.require(ENV_GCP_CLIENT_SECRET)?,
      refresh_token: env.require(ENV_GCP_REFRESH_TOKEN)?,
    };
    debug!("Loaded Google credentials for client {}", creds.client_id);
    Ok(creds)
  }
}

/// Kind of account that owns the Projects board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectOwnerKind {
  #[default]
  Organization,
  User,
}

impl ProjectOwnerKind {
  /// Field name of the owner object in the GraphQL schema.
  pub const fn graphql_field(self) -> &'static str {
    match self {
      Self::Organization => "organization",
      Self::User => "user",
    }
  }

  fn parse(raw: &str) -> Result<Self, MirrorError> {
    match raw.to_ascii_lowercase().as_str() {
      "organization" | "org" => Ok(Self::Organization),
      "user" => Ok(Self::User),
      other => Err(MirrorError::invalid(
        ENV_PROJECT_OWNER_TYPE,
        format!("must be 'organization' or 'user', got '{other}'"),
      )),
    }
  }
}

/// Where the mirrored issue goes and which board it is synced to.
#[derive(Clone, PartialEq, Eq)]
pub struct MirrorTarget {
  pub owner: String,
  pub repo: String,
  pub token: String,
  /// Token for commenting on the source issue.
  pub source_token: String,
  pub project_number: u32,
  pub project_owner_kind: ProjectOwnerKind,
}

impl fmt::Debug for MirrorTarget {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("MirrorTarget")
      .field("owner", &self.owner)
      .field("repo", &self.repo)
      .field("token", &"<redacted>")
      .field("source_token", &"<redacted>")
      .field("project_number", &self.project_number)
      .field("project_owner_kind", &self.project_owner_kind)
      .finish()
  }
}

impl MirrorTarget {
  pub fn from_env(env: &impl EnvSource) -> Result<Self, MirrorError> {
    let owner = env.require(ENV_TARGET_REPO_OWNER)?;
    let repo = env.require(ENV_TARGET_REPO_NAME)?;
    let token = env.require(ENV_TARGET_REPO_TOKEN)?;

    let raw_number = env.require(ENV_PROJECT_NUMBER)?;
    let project_number = raw_number
      .parse::<u32>()
      .ok()
      .filter(|n| *n > 0)
      .ok_or_else(|| MirrorError::invalid(ENV_PROJECT_NUMBER, format!("must be a positive integer, got '{raw_number}'")))?;

    let project_owner_kind = match env.non_blank(ENV_PROJECT_OWNER_TYPE) {
      Some(raw) => ProjectOwnerKind::parse(&raw)?,
      None => ProjectOwnerKind::default(),
    };

    let source_token = env
      .non_blank(ENV_SOURCE_REPO_TOKEN)
      .or_else(|| env.non_blank(ENV_GITHUB_TOKEN))
      .unwrap_or_else(|| token.clone());

    Ok(Self {
      owner,
      repo,
      token,
      source_token,
      project_number,
      project_owner_kind,
    })
  }

  pub fn full_name(&self) -> String {
    format!("{}/{}", self.owner, self.repo)
  }
}
