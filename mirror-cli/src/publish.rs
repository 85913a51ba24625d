//! # Mirror Publisher
//!
//! Creates the mirrored issue in the target repository and links it back
//! from the source issue.

use anyhow::{Context, Result};
use mirror_core::consts::MIRROR_LABEL;
use mirror_core::{IssueRecord, MirrorTarget};
use mirror_gh::{CreateIssueParams, GitHubClient};
use tracing::{info, warn};

/// The issue created in the target repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorIssue {
  pub number: u64,
  pub url: String,
  /// GraphQL node id, used to attach the issue to the board
  pub node_id: String,
  /// Back-link comment on the source issue, or why it could not be posted
  pub back_link: Result<String, String>,
}

impl MirrorIssue {
  /// Warning to surface when the back-link comment was not posted.
  pub fn back_link_warning(&self) -> Option<String> {
    self
      .back_link
      .as_ref()
      .err()
      .map(|reason| format!("Mirrored issue {} was created but the back-link comment failed: {reason}", self.url))
  }
}

/// Request body for the mirrored issue.
pub fn mirror_params(issue: &IssueRecord, body: String) -> CreateIssueParams {
  let mut labels = issue.labels.clone();
  if !labels.iter().any(|label| label == MIRROR_LABEL) {
    labels.push(MIRROR_LABEL.to_string());
  }

  CreateIssueParams {
    title: issue.title.clone(),
    body,
    labels,
    assignees: issue.assignees.clone(),
  }
}

/// Body of the back-link comment on the source issue.
pub fn back_link_comment(target: &MirrorTarget, number: u64, url: &str) -> String {
  format!(
    "This incident has been mirrored to {}#{number}: {url}",
    target.full_name()
  )
}

/// Create the mirror and post exactly one back-link comment on the source.
///
/// Only the issue creation is fatal. A failed comment is recorded on the
/// returned [`MirrorIssue`] so the run can still sync the board.
pub async fn publish_mirror(
  target_client: &GitHubClient,
  source_client: &GitHubClient,
  target: &MirrorTarget,
  issue: &IssueRecord,
  body: String,
) -> Result<MirrorIssue> {
  let (source_owner, source_repo) = issue.source_repo()?;
  let params = mirror_params(issue, body);
  let created = target_client
    .create_issue(&target.owner, &target.repo, &params)
    .await
    .context("Failed to create the mirrored issue")?;

  info!(
    "Mirrored {}#{} to {}#{}",
    issue.source_repo_name,
    issue.number,
    target.full_name(),
    created.number
  );

  let back_link = source_client
    .create_issue_comment(
      source_owner,
      source_repo,
      issue.number,
      &back_link_comment(target, created.number, &created.html_url),
    )
    .await
    .map(|comment| comment.html_url)
    .map_err(|err| {
      warn!("Back-link comment on {}#{} failed: {:#}", issue.source_repo_name, issue.number, err);
      format!("{err:#}")
    });

  Ok(MirrorIssue {
    number: created.number,
    url: created.html_url,
    node_id: created.node_id,
    back_link,
  })
}

#[cfg(test)]
mod tests {
  use mirror_core::{IssueState, ProjectOwnerKind};

  use super::*;

  fn issue(labels: &[&str], assignees: &[&str]) -> IssueRecord {
    IssueRecord {
      number: 42,
      title: "Suspicious login activity".into(),
      description: String::new(),
      author: Some("octocat".into()),
      url: "https://github.com/acme/payments/issues/42".into(),
      assignees: assignees.iter().map(|a| a.to_string()).collect(),
      state: IssueState::Open,
      updated_at: None,
      closed_at: None,
      source_repo_name: "acme/payments".into(),
      labels: labels.iter().map(|l| l.to_string()).collect(),
    }
  }

  fn target() -> MirrorTarget {
    MirrorTarget {
      owner: "acme".into(),
      repo: "security-incidents".into(),
      token: "t".into(),
      source_token: "s".into(),
      project_number: 7,
      project_owner_kind: ProjectOwnerKind::Organization,
    }
  }

  #[test]
  fn test_params_copy_title_and_add_marker_label() {
    let params = mirror_params(&issue(&["security", "sev1"], &["alice"]), "body".into());
    assert_eq!(params.title, "Suspicious login activity");
    assert_eq!(params.labels, vec!["security", "sev1", "mirrored-incident"]);
    assert_eq!(params.assignees, vec!["alice"]);
  }

  #[test]
  fn test_marker_label_not_duplicated() {
    let params = mirror_params(&issue(&["mirrored-incident"], &[]), "body".into());
    assert_eq!(params.labels, vec!["mirrored-incident"]);
  }

  #[test]
  fn test_empty_assignees_are_omitted() {
    let params = mirror_params(&issue(&[], &[]), "body".into());
    let json = serde_json::to_value(&params).unwrap();
    assert!(json.get("assignees").is_none());
  }

  #[test]
  fn test_back_link_warning_only_on_failure() {
    let mut mirror = MirrorIssue {
      number: 17,
      url: "https://github.com/acme/security-incidents/issues/17".into(),
      node_id: "I_kw17".into(),
      back_link: Ok("https://github.com/acme/payments/issues/42#issuecomment-5".into()),
    };
    assert_eq!(mirror.back_link_warning(), None);

    mirror.back_link = Err("GitHub request failed with HTTP 403: Resource not accessible".into());
    assert_eq!(
      mirror.back_link_warning().as_deref(),
      Some(
        "Mirrored issue https://github.com/acme/security-incidents/issues/17 was created but the back-link comment \
         failed: GitHub request failed with HTTP 403: Resource not accessible"
      )
    );
  }

  #[test]
  fn test_back_link_comment() {
    assert_eq!(
      back_link_comment(&target(), 17, "https://github.com/acme/security-incidents/issues/17"),
      "This incident has been mirrored to acme/security-incidents#17: https://github.com/acme/security-incidents/issues/17"
    );
  }
}
