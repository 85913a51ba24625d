//! Payload and document fixtures
//!
//! The values mirror what the Actions runner and Drive actually send, trimmed
//! to the fields the pipeline reads.

use serde_json::{Value, json};

/// Document id used by [`issue_event_with_doc`]
pub const DOC_ID: &str = "ABC123";

/// An `issues` event for `acme/payments#number` with the given body
pub fn issue_event(number: u64, body: Option<&str>) -> Value {
  json!({
    "action": "opened",
    "issue": {
      "number": number,
      "title": "Suspicious login activity",
      "body": body,
      "user": { "login": "octocat", "id": 1 },
      "html_url": format!("https://github.com/acme/payments/issues/{number}"),
      "assignees": [{ "login": "alice", "id": 2 }],
      "state": "open",
      "updated_at": "2024-03-16T08:30:00Z",
      "closed_at": null,
      "labels": [{ "name": "security" }]
    },
    "repository": { "full_name": "acme/payments" }
  })
}

/// An `issues` event whose description links [`DOC_ID`]
pub fn issue_event_with_doc(number: u64) -> Value {
  issue_event(
    number,
    Some(&format!(
      "Incident report: https://docs.google.com/document/d/{DOC_ID}/edit\n\nPlease triage."
    )),
  )
}

/// A Markdown export of a filled-in incident report
pub fn incident_markdown() -> String {
  "\
# **Security Incident Report**

| **Incident Number** | INC-2024-0042 |
| :---- | :---- |
| **Incident Type** | Credential Stuffing |
| **Opened** | 2024-03-15 09:12 UTC |
| **Last Updated** | 2024-02-30 |
| **Last Updated By** | Jane Doe |
| **Closed** | SELECT |
| **Reported By** | SOC on-call |
| **Description** | Repeated failed logins against the payments API |
| **Impacted Customer/BU** | Retail |
| **State** | In Progress |
| **Priority** | P1 |
| **Assignment To** |  |
| **Assignment Group** | Security Operations |
| **Affected System** | N/A |
"
  .to_string()
}
