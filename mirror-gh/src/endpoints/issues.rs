//! GitHub Issues API endpoint implementations.

use anyhow::Result;
use mirror_core::MirrorError;
use serde::Serialize;
use tracing::{info, instrument, trace};

use crate::client::GitHubClient;
use crate::consts::SERVICE_REST;
use crate::models::{GitHubComment, GitHubIssue};

/// Parameters for creating a new issue
#[derive(Debug, Clone, Serialize)]
pub struct CreateIssueParams {
  pub title: String,
  pub body: String,
  pub labels: Vec<String>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub assignees: Vec<String>,
}

impl GitHubClient {
  /// Create an issue in `owner/repo`.
  ///
  /// # Errors
  ///
  /// Returns an upstream error carrying the HTTP status and body when GitHub
  /// rejects the request, or a transport error when it cannot be sent.
  #[instrument(skip(self, params), level = "debug")]
  pub async fn create_issue(&self, owner: &str, repo: &str, params: &CreateIssueParams) -> Result<GitHubIssue> {
    info!("Creating issue '{}' in {}/{}", params.title, owner, repo);

    let url = format!("{}/repos/{}/{}/issues", self.base_url, owner, repo);
    trace!("GitHub API URL: {}", url);

    let response = self
      .authorized(self.client.post(&url))
      .json(params)
      .send()
      .await
      .map_err(|e| MirrorError::upstream(SERVICE_REST, None, format!("POST {url} failed: {e}")))?;

    let issue: GitHubIssue = Self::parse_response(response, SERVICE_REST, "created issue").await?;
    info!("Created issue #{} at {}", issue.number, issue.html_url);
    Ok(issue)
  }

  /// Post a comment on issue `issue_number` of `owner/repo`.
  #[instrument(skip(self, body), level = "debug")]
  pub async fn create_issue_comment(
    &self,
    owner: &str,
    repo: &str,
    issue_number: u64,
    body: &str,
  ) -> Result<GitHubComment> {
    info!("Commenting on {}/{}#{}", owner, repo, issue_number);

    let url = format!("{}/repos/{}/{}/issues/{}/comments", self.base_url, owner, repo, issue_number);
    trace!("GitHub API URL: {}", url);

    let response = self
      .authorized(self.client.post(&url))
      .json(&serde_json::json!({ "body": body }))
      .send()
      .await
      .map_err(|e| MirrorError::upstream(SERVICE_REST, None, format!("POST {url} failed: {e}")))?;

    let comment: GitHubComment = Self::parse_response(response, SERVICE_REST, "issue comment").await?;
    info!("Posted comment {}", comment.html_url);
    Ok(comment)
  }
}
