use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Represents GitHub authentication credentials
#[derive(Clone)]
pub struct GitHubAuth {
  pub token: String,
}

impl fmt::Debug for GitHubAuth {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("GitHubAuth").field("token", &"<redacted>").finish()
  }
}

/// Represents a GitHub user
#[derive(Debug, Deserialize)]
pub struct GitHubUser {
  pub login: String,
  pub id: u64,
}

/// Represents a GitHub label
#[derive(Debug, Deserialize)]
pub struct GitHubLabel {
  pub name: String,
}

/// Represents a GitHub issue as returned by the REST API
#[derive(Debug, Deserialize)]
pub struct GitHubIssue {
  pub id: u64,
  /// GraphQL node id, needed to attach the issue to a project board
  pub node_id: String,
  pub number: u64,
  pub title: String,
  pub html_url: String,
  pub state: String,
  #[serde(default)]
  pub labels: Vec<GitHubLabel>,
  #[serde(default)]
  pub assignees: Vec<GitHubUser>,
}

/// Represents a comment on a GitHub issue
#[derive(Debug, Deserialize)]
pub struct GitHubComment {
  pub id: u64,
  pub html_url: String,
}

/// Data kind of a project board field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectFieldKind {
  Text,
  Date,
  SingleSelect,
  /// Any other `ProjectV2FieldType`, such as `NUMBER` or `ITERATION`
  Other(String),
}

impl ProjectFieldKind {
  pub fn from_data_type(data_type: &str) -> Self {
    match data_type {
      "TEXT" => Self::Text,
      "DATE" => Self::Date,
      "SINGLE_SELECT" => Self::SingleSelect,
      other => Self::Other(other.to_string()),
    }
  }
}

/// Represents an option of a single-select project field
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SingleSelectOption {
  pub id: String,
  pub name: String,
}

/// Represents one field of a project board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectField {
  pub id: String,
  pub name: String,
  pub kind: ProjectFieldKind,
  pub options: Vec<SingleSelectOption>,
}

impl ProjectField {
  /// Find a single-select option by name, ignoring case
  pub fn option_named(&self, name: &str) -> Option<&SingleSelectOption> {
    self
      .options
      .iter()
      .find(|option| option.name.eq_ignore_ascii_case(name.trim()))
  }
}

/// Field schema of a project board, keyed by field name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSchema {
  pub project_id: String,
  pub title: String,
  pub fields: HashMap<String, ProjectField>,
}

impl ProjectSchema {
  pub fn field(&self, name: &str) -> Option<&ProjectField> {
    self.fields.get(name)
  }
}

/// Value written to a project item field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ProjectFieldValue {
  #[serde(rename = "text")]
  Text(String),
  /// Strict `YYYY-MM-DD`
  #[serde(rename = "date")]
  Date(String),
  #[serde(rename = "singleSelectOptionId")]
  SingleSelect(String),
}

/// GraphQL response envelope
#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse<T> {
  pub data: Option<T>,
  #[serde(default)]
  pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlError {
  pub message: String,
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn test_github_auth_debug_redacts_token() {
    let auth = GitHubAuth {
      token: "ghp_secret".to_string(),
    };
    assert!(!format!("{auth:?}").contains("ghp_secret"));
  }

  #[test]
  fn test_github_issue_deserialization() {
    let json = json!({
        "id": 1,
        "node_id": "I_kwDOA",
        "number": 1347,
        "title": "Found a bug",
        "html_url": "https://github.com/octocat/Hello-World/issues/1347",
        "state": "open",
        "labels": [{ "id": 208045946, "name": "bug", "color": "f29513" }],
        "assignees": [{ "login": "octocat", "id": 1 }]
    });

    let issue: GitHubIssue = serde_json::from_value(json).unwrap();

    assert_eq!(issue.number, 1347);
    assert_eq!(issue.node_id, "I_kwDOA");
    assert_eq!(issue.labels[0].name, "bug");
    assert_eq!(issue.assignees[0].login, "octocat");
  }

  #[test]
  fn test_field_kind_from_data_type() {
    assert_eq!(ProjectFieldKind::from_data_type("TEXT"), ProjectFieldKind::Text);
    assert_eq!(ProjectFieldKind::from_data_type("DATE"), ProjectFieldKind::Date);
    assert_eq!(ProjectFieldKind::from_data_type("SINGLE_SELECT"), ProjectFieldKind::SingleSelect);
    assert_eq!(
      ProjectFieldKind::from_data_type("ITERATION"),
      ProjectFieldKind::Other("ITERATION".to_string())
    );
  }

  #[test]
  fn test_field_value_serialization() {
    assert_eq!(
      serde_json::to_value(ProjectFieldValue::Text("P1".into())).unwrap(),
      json!({ "text": "P1" })
    );
    assert_eq!(
      serde_json::to_value(ProjectFieldValue::Date("2024-03-15".into())).unwrap(),
      json!({ "date": "2024-03-15" })
    );
    assert_eq!(
      serde_json::to_value(ProjectFieldValue::SingleSelect("opt1".into())).unwrap(),
      json!({ "singleSelectOptionId": "opt1" })
    );
  }

  #[test]
  fn test_option_named_ignores_case() {
    let field = ProjectField {
      id: "F1".into(),
      name: "Category/Rating/Priority".into(),
      kind: ProjectFieldKind::SingleSelect,
      options: vec![SingleSelectOption {
        id: "O1".into(),
        name: "P1".into(),
      }],
    };
    assert_eq!(field.option_named(" p1 ").map(|o| o.id.as_str()), Some("O1"));
    assert!(field.option_named("P2").is_none());
  }
}
