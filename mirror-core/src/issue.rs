//! # Issue Data Normalizer
//!
//! Turns the raw `issues` event payload into an [`IssueRecord`]. Optional
//! parts of the payload (assignees, labels, author) degrade to
//! empty values; required identifiers produce [`MirrorError::Payload`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace};

use crate::error::MirrorError;

/// Lifecycle state of the source issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
  Open,
  Closed,
}

impl IssueState {
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Open => "open",
      Self::Closed => "closed",
    }
  }
}

/// Flat view of the issue that triggered the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRecord {
  pub number: u64,
  pub title: String,
  /// Issue body; empty when the issue has none.
  pub description: String,
  pub author: Option<String>,
  pub url: String,
  pub assignees: Vec<String>,
  pub state: IssueState,
  pub updated_at: Option<DateTime<Utc>>,
  pub closed_at: Option<DateTime<Utc>>,
  /// `owner/name` of the repository the issue lives in.
  pub source_repo_name: String,
  pub labels: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct EventPayload {
  issue: Option<RawIssue>,
  repository: Option<RawRepository>,
}

#[derive(Debug, Deserialize)]
struct RawIssue {
  number: Option<u64>,
  title: Option<String>,
  body: Option<String>,
  user: Option<RawUser>,
  html_url: Option<String>,
  #[serde(default)]
  assignees: Option<Vec<RawUser>>,
  state: Option<IssueState>,
  updated_at: Option<DateTime<Utc>>,
  closed_at: Option<DateTime<Utc>>,
  #[serde(default)]
  labels: Option<Vec<RawLabel>>,
}

#[derive(Debug, Deserialize)]
struct RawUser {
  login: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawLabel {
  Named { name: String },
  Plain(String),
}

#[derive(Debug, Deserialize)]
struct RawRepository {
  full_name: Option<String>,
}

impl IssueRecord {
  /// Normalize an event payload.
  pub fn from_event(payload: &Value) -> Result<Self, MirrorError> {
    let event = EventPayload::deserialize(payload).map_err(|e| MirrorError::Payload(e.to_string()))?;

    let issue = event
      .issue
      .ok_or_else(|| MirrorError::Payload("event has no issue object".to_string()))?;
    let source_repo_name = event
      .repository
      .and_then(|repo| repo.full_name)
      .filter(|name| !name.trim().is_empty())
      .ok_or_else(|| MirrorError::Payload("repository.full_name is missing".to_string()))?;

    let number = issue
      .number
      .ok_or_else(|| MirrorError::Payload("issue.number is missing".to_string()))?;
    let title = issue
      .title
      .ok_or_else(|| MirrorError::Payload("issue.title is missing".to_string()))?;
    let url = issue
      .html_url
      .ok_or_else(|| MirrorError::Payload("issue.html_url is missing".to_string()))?;

    let labels = issue
      .labels
      .unwrap_or_default()
      .into_iter()
      .map(|label| match label {
        RawLabel::Named { name } | RawLabel::Plain(name) => name,
      })
      .fold(Vec::new(), |mut acc, name| {
        if !acc.contains(&name) {
          acc.push(name);
        }
        acc
      });

    let record = Self {
      number,
      title,
      description: issue.body.unwrap_or_default(),
      author: issue.user.map(|user| user.login),
      url,
      assignees: issue
        .assignees
        .unwrap_or_default()
        .into_iter()
        .map(|user| user.login)
        .collect(),
      state: issue.state.unwrap_or(IssueState::Open),
      updated_at: issue.updated_at,
      closed_at: issue.closed_at,
      source_repo_name,
      labels,
    };

    debug!("Normalized issue #{} from {}", record.number, record.source_repo_name);
    trace!("Issue record: {:?}", record);
    Ok(record)
  }

  /// Author login, or `Unknown` when the event carries no user.
  pub fn author_or_unknown(&self) -> &str {
    self.author.as_deref().unwrap_or(crate::consts::UNKNOWN_AUTHOR)
  }

  /// Split `source_repo_name` into owner and repository name.
  pub fn source_repo(&self) -> Result<(&str, &str), MirrorError> {
    self
      .source_repo_name
      .split_once('/')
      .filter(|(owner, repo)| !owner.is_empty() && !repo.is_empty())
      .ok_or_else(|| MirrorError::Payload(format!("malformed repository name '{}'", self.source_repo_name)))
  }
}
