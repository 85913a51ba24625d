//! # Incident Details
//!
//! The fixed set of incident fields pulled from the exported report. Every
//! field is always present; absence is carried by [`FieldValue::NotFound`]
//! and [`FieldValue::NotSpecified`] and only becomes a sentinel string when
//! serialized.

use serde::Serialize;
use tracing::{debug, info};

use crate::dates::DATE_FORMAT;
use crate::extract::{FieldValue, extract_field};
use crate::issue::{IssueRecord, IssueState};
use crate::locator::DocumentId;

/// Row labels as they appear in the incident report template.
pub mod labels {
  pub const INCIDENT_NUMBER: &str = "Incident Number";
  pub const INCIDENT_TYPE: &str = "Incident Type";
  pub const OPENED: &str = "Opened";
  pub const LAST_UPDATED: &str = "Last Updated";
  pub const LAST_UPDATED_BY: &str = "Last Updated By";
  pub const CLOSED: &str = "Closed";
  pub const REPORTED_BY: &str = "Reported By";
  pub const DESCRIPTION: &str = "Description";
  pub const IMPACTED_CUSTOMER_OR_BU: &str = "Impacted Customer/BU";
  pub const STATE: &str = "State";
  pub const PRIORITY: &str = "Priority";
  pub const ASSIGNMENT_TO: &str = "Assignment To";
  pub const ASSIGNMENT_GROUP: &str = "Assignment Group";
  pub const AFFECTED_SYSTEM: &str = "Affected System";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentDetails {
  pub incident_number: FieldValue,
  pub incident_type: FieldValue,
  pub opened_date: FieldValue,
  pub last_updated: FieldValue,
  pub last_updated_by: FieldValue,
  pub closed_date: FieldValue,
  pub reported_by: FieldValue,
  pub description: FieldValue,
  #[serde(rename = "impactedCustomerOrBU")]
  pub impacted_customer_or_bu: FieldValue,
  pub state: FieldValue,
  pub priority: FieldValue,
  pub assignment_to: FieldValue,
  pub assignment_group: FieldValue,
  pub affected_system: FieldValue,
  pub attachment_options: FieldValue,
}

impl IncidentDetails {
  /// Extract every incident field from the exported `markdown`, filling gaps
  /// from the source issue where it knows the answer.
  pub fn extract(markdown: &str, issue: &IssueRecord, document: &DocumentId) -> Self {
    let field = |label: &str| extract_field(markdown, label);

    let details = Self {
      incident_number: field(labels::INCIDENT_NUMBER),
      incident_type: field(labels::INCIDENT_TYPE),
      opened_date: field(labels::OPENED),
      last_updated: field(labels::LAST_UPDATED)
        .or_else_found(|| issue.updated_at.map(|at| at.format(DATE_FORMAT).to_string())),
      last_updated_by: field(labels::LAST_UPDATED_BY),
      closed_date: field(labels::CLOSED).or_else_found(|| match issue.state {
        IssueState::Closed => issue.closed_at.map(|at| at.format(DATE_FORMAT).to_string()),
        IssueState::Open => None,
      }),
      reported_by: field(labels::REPORTED_BY).or_else_found(|| issue.author.clone()),
      description: field(labels::DESCRIPTION),
      impacted_customer_or_bu: field(labels::IMPACTED_CUSTOMER_OR_BU),
      state: field(labels::STATE).or_else_found(|| Some(issue.state.as_str().to_string())),
      priority: field(labels::PRIORITY),
      assignment_to: field(labels::ASSIGNMENT_TO),
      assignment_group: field(labels::ASSIGNMENT_GROUP),
      affected_system: field(labels::AFFECTED_SYSTEM),
      attachment_options: FieldValue::Found(document.url()),
    };

    let found = details.entries().iter().filter(|(_, value)| value.is_found()).count();
    info!("Extracted {} of {} incident fields", found, details.entries().len());
    debug!("Incident details: {:?}", details);
    details
  }

  /// Field names paired with their values, in output order.
  pub fn entries(&self) -> [(&'static str, &FieldValue); 15] {
    [
      ("incidentNumber", &self.incident_number),
      ("incidentType", &self.incident_type),
      ("openedDate", &self.opened_date),
      ("lastUpdated", &self.last_updated),
      ("lastUpdatedBy", &self.last_updated_by),
      ("closedDate", &self.closed_date),
      ("reportedBy", &self.reported_by),
      ("description", &self.description),
      ("impactedCustomerOrBU", &self.impacted_customer_or_bu),
      ("state", &self.state),
      ("priority", &self.priority),
      ("assignmentTo", &self.assignment_to),
      ("assignmentGroup", &self.assignment_group),
      ("affectedSystem", &self.affected_system),
      ("attachmentOptions", &self.attachment_options),
    ]
  }

  /// Compact JSON with sentinel strings in place of absent values.
  pub fn to_json(&self) -> serde_json::Result<String> {
    serde_json::to_string(self)
  }
}

#[cfg(test)]
mod tests {
  use chrono::{TimeZone, Utc};

  use super::*;
  use crate::locator::locate_document_id;

  fn issue(state: IssueState) -> IssueRecord {
    IssueRecord {
      number: 42,
      title: "Suspicious login activity".into(),
      description: "https://docs.google.com/document/d/ABC123/edit".into(),
      author: Some("octocat".into()),
      url: "https://github.com/acme/payments/issues/42".into(),
      assignees: vec![],
      state,
      updated_at: Utc.with_ymd_and_hms(2024, 3, 16, 8, 30, 0).single(),
      closed_at: Utc.with_ymd_and_hms(2024, 3, 17, 10, 0, 0).single(),
      source_repo_name: "acme/payments".into(),
      labels: vec![],
    }
  }

  #[test]
  fn test_priority_and_attachment() {
    let record = issue(IssueState::Open);
    let doc = locate_document_id(&record.description).unwrap();
    let details = IncidentDetails::extract("| **Priority** | P1 |", &record, &doc);

    assert_eq!(details.priority, FieldValue::Found("P1".into()));
    assert_eq!(details.attachment_options.as_display(), "https://docs.google.com/document/d/ABC123");
    assert_eq!(details.incident_type, FieldValue::NotFound);
  }

  #[test]
  fn test_issue_fallbacks() {
    let record = issue(IssueState::Closed);
    let doc = locate_document_id(&record.description).unwrap();
    let details = IncidentDetails::extract("", &record, &doc);

    assert_eq!(details.last_updated.as_display(), "2024-03-16");
    assert_eq!(details.closed_date.as_display(), "2024-03-17");
    assert_eq!(details.reported_by.as_display(), "octocat");
    assert_eq!(details.state.as_display(), "closed");
  }

  #[test]
  fn test_open_issue_has_no_closed_fallback() {
    let record = issue(IssueState::Open);
    let doc = locate_document_id(&record.description).unwrap();
    let details = IncidentDetails::extract("", &record, &doc);
    assert_eq!(details.closed_date, FieldValue::NotFound);
  }

  #[test]
  fn test_document_values_beat_fallbacks() {
    let record = issue(IssueState::Closed);
    let doc = locate_document_id(&record.description).unwrap();
    let markdown = "| **State** | Resolved |\n| **Reported By** | SOC |\n| **Closed** | SELECT |";
    let details = IncidentDetails::extract(markdown, &record, &doc);

    assert_eq!(details.state.as_display(), "Resolved");
    assert_eq!(details.reported_by.as_display(), "SOC");
    assert_eq!(details.closed_date, FieldValue::NotSpecified);
  }

  #[test]
  fn test_json_has_every_key() {
    let record = issue(IssueState::Open);
    let doc = locate_document_id(&record.description).unwrap();
    let details = IncidentDetails::extract("| **Priority** | N/A |", &record, &doc);
    let json: serde_json::Value = serde_json::from_str(&details.to_json().unwrap()).unwrap();
    let object = json.as_object().unwrap();

    assert_eq!(object.len(), 15);
    for (key, _) in details.entries() {
      assert!(object.contains_key(key), "missing {key}");
    }
    assert_eq!(object["priority"], "Not Specified");
    assert_eq!(object["incidentType"], "Not Found");
  }
}
