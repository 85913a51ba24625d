//! # Template Renderer
//!
//! Fills the mirrored-issue Markdown template. Placeholders are bracketed
//! upper-case tokens such as `[PRIORITY]`; tokens without a value are left in
//! place. Rendering is a single pass, so text coming from a substituted value
//! is never interpreted as another token.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::{debug, trace};

use crate::error::MirrorError;
use crate::extract::FieldValue;
use crate::incident::IncidentDetails;
use crate::issue::IssueRecord;

static TOKEN_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\[[A-Z][A-Z_]*\]").expect("Failed to compile template token regex"));

/// Every token the mirrored-issue template understands.
pub const PLACEHOLDERS: [&str; 19] = [
  "[REPO_NAME]",
  "[ISSUE_NUMBER]",
  "[ISSUE_URL]",
  "[AUTHOR]",
  "[INCIDENT_NUMBER]",
  "[INCIDENT_TYPE]",
  "[OPENED_DATE]",
  "[LAST_UPDATED]",
  "[LAST_UPDATED_BY]",
  "[CLOSED_DATE]",
  "[REPORTED_BY]",
  "[DESCRIPTION]",
  "[IMPACTED_CUSTOMER_OR_BU]",
  "[STATE]",
  "[PRIORITY]",
  "[ASSIGNMENT_TO]",
  "[ASSIGNMENT_GROUP]",
  "[AFFECTED_SYSTEM]",
  "[ATTACHMENT_OPTIONS]",
];

/// Incident tokens and the field each one is filled from.
const INCIDENT_TOKENS: [(&str, fn(&IncidentDetails) -> &FieldValue); 15] = [
  ("[INCIDENT_NUMBER]", |d| &d.incident_number),
  ("[INCIDENT_TYPE]", |d| &d.incident_type),
  ("[OPENED_DATE]", |d| &d.opened_date),
  ("[LAST_UPDATED]", |d| &d.last_updated),
  ("[LAST_UPDATED_BY]", |d| &d.last_updated_by),
  ("[CLOSED_DATE]", |d| &d.closed_date),
  ("[REPORTED_BY]", |d| &d.reported_by),
  ("[DESCRIPTION]", |d| &d.description),
  ("[IMPACTED_CUSTOMER_OR_BU]", |d| &d.impacted_customer_or_bu),
  ("[STATE]", |d| &d.state),
  ("[PRIORITY]", |d| &d.priority),
  ("[ASSIGNMENT_TO]", |d| &d.assignment_to),
  ("[ASSIGNMENT_GROUP]", |d| &d.assignment_group),
  ("[AFFECTED_SYSTEM]", |d| &d.affected_system),
  ("[ATTACHMENT_OPTIONS]", |d| &d.attachment_options),
];

/// Token-to-value mapping used for one render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateValues {
  values: BTreeMap<String, String>,
}

impl TemplateValues {
  pub fn new() -> Self {
    Self::default()
  }

  /// Set the value for `token`, given with its brackets.
  pub fn insert(&mut self, token: impl Into<String>, value: impl Into<String>) -> &mut Self {
    self.values.insert(token.into(), value.into());
    self
  }

  pub fn get(&self, token: &str) -> Option<&str> {
    self.values.get(token).map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  /// Values for every entry of [`PLACEHOLDERS`].
  pub fn for_incident(issue: &IssueRecord, details: &IncidentDetails) -> Self {
    let mut values = Self::new();
    values
      .insert("[REPO_NAME]", issue.source_repo_name.as_str())
      .insert("[ISSUE_NUMBER]", issue.number.to_string())
      .insert("[ISSUE_URL]", issue.url.as_str())
      .insert("[AUTHOR]", issue.author_or_unknown());

    for (token, field) in INCIDENT_TOKENS {
      values.insert(token, field(details).as_display());
    }
    values
  }
}

/// Substitute every known token in `template`.
pub fn render_template(template: &str, values: &TemplateValues) -> String {
  let rendered = TOKEN_REGEX.replace_all(template, |captures: &Captures<'_>| {
    let token = &captures[0];
    match values.get(token) {
      Some(value) => value.to_string(),
      None => {
        trace!("Leaving unmapped token {} in place", token);
        token.to_string()
      }
    }
  });
  rendered.into_owned()
}

/// Read the template file, reporting an unreadable file as configuration.
pub fn load_template(path: &Path) -> Result<String, MirrorError> {
  debug!("Loading issue template from {}", path.display());
  std::fs::read_to_string(path)
    .map_err(|e| MirrorError::invalid("template", format!("{} could not be read: {e}", path.display())))
}
