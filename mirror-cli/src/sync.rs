//! # Project Sync
//!
//! Best-effort copy of incident fields onto the project board. Nothing in
//! here fails the run: the mirrored issue already exists, so every problem is
//! logged as a warning and recorded in the [`SyncReport`].

use anyhow::Result;
use mirror_core::dates::{is_strict_date, normalize_date};
use mirror_core::{FieldValue, IncidentDetails, MirrorTarget};
use mirror_gh::{GitHubClient, ProjectField, ProjectFieldKind, ProjectFieldValue};
use tracing::{debug, info, warn};

/// Board field names paired with the incident value written to each.
pub fn board_values(details: &IncidentDetails) -> [(&'static str, &FieldValue); 13] {
  [
    ("Incident Number", &details.incident_number),
    ("Incident Type", &details.incident_type),
    ("Opened Date", &details.opened_date),
    ("Last Updated", &details.last_updated),
    ("Closed Date", &details.closed_date),
    ("Reported By", &details.reported_by),
    ("Impacted Customer/BU", &details.impacted_customer_or_bu),
    ("State", &details.state),
    ("Category/Rating/Priority", &details.priority),
    ("Assignment To", &details.assignment_to),
    ("Assignment Group", &details.assignment_group),
    ("Affected System", &details.affected_system),
    ("Attachment", &details.attachment_options),
  ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSyncOutcome {
  Written,
  Skipped(String),
  Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSync {
  pub field: String,
  pub outcome: FieldSyncOutcome,
}

/// What happened during the board sync.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
  pub item_id: Option<String>,
  pub fields: Vec<FieldSync>,
  /// Set when the board could not be read or the item not attached
  pub failure: Option<String>,
}

impl SyncReport {
  pub fn written(&self) -> usize {
    self
      .fields
      .iter()
      .filter(|f| f.outcome == FieldSyncOutcome::Written)
      .count()
  }

  pub fn outcome_of(&self, field: &str) -> Option<&FieldSyncOutcome> {
    self.fields.iter().find(|f| f.field == field).map(|f| &f.outcome)
  }

  /// Warnings worth surfacing in the job summary.
  pub fn warnings(&self) -> Vec<String> {
    let mut warnings: Vec<String> = self.failure.iter().cloned().collect();
    warnings.extend(self.fields.iter().filter_map(|f| match &f.outcome {
      FieldSyncOutcome::Failed(reason) => Some(format!("Project field '{}' was not updated: {reason}", f.field)),
      _ => None,
    }));
    warnings
  }
}

/// Turn an incident value into the mutation input for `field`, or explain
/// why it is skipped.
pub fn resolve_value(field: &ProjectField, value: &FieldValue) -> Result<ProjectFieldValue, String> {
  let Some(text) = value.usable() else {
    return Err(format!("no value ({})", value.as_display()));
  };

  match &field.kind {
    ProjectFieldKind::Text => Ok(ProjectFieldValue::Text(text.to_string())),
    ProjectFieldKind::Date => normalize_date(value)
      .filter(|date| is_strict_date(date))
      .map(ProjectFieldValue::Date)
      .ok_or_else(|| format!("'{text}' is not a valid YYYY-MM-DD date")),
    ProjectFieldKind::SingleSelect => field
      .option_named(text)
      .map(|option| ProjectFieldValue::SingleSelect(option.id.clone()))
      .ok_or_else(|| format!("no option named '{text}'")),
    ProjectFieldKind::Other(kind) => Err(format!("unsupported field type {kind}")),
  }
}

/// Attach the mirrored issue to the board and write every mapped field.
pub async fn sync_project(
  client: &GitHubClient,
  target: &MirrorTarget,
  content_id: &str,
  details: &IncidentDetails,
) -> SyncReport {
  let mut report = SyncReport::default();
  if let Err(err) = sync_into(&mut report, client, target, content_id, details).await {
    let message = format!("Project sync failed: {err:#}");
    warn!("{}", message);
    report.failure = Some(message);
  }
  report
}

async fn sync_into(
  report: &mut SyncReport,
  client: &GitHubClient,
  target: &MirrorTarget,
  content_id: &str,
  details: &IncidentDetails,
) -> Result<()> {
  let schema = client
    .get_project_schema(target.project_owner_kind, &target.owner, target.project_number)
    .await?;
  let item_id = client.add_project_item(&schema.project_id, content_id).await?;
  report.item_id = Some(item_id.clone());

  for (name, value) in board_values(details) {
    let outcome = match schema.field(name) {
      None => {
        debug!("Board has no field named '{}', skipping", name);
        FieldSyncOutcome::Skipped("field not on board".to_string())
      }
      Some(field) => match resolve_value(field, value) {
        Err(reason) => {
          debug!("Skipping '{}': {}", name, reason);
          FieldSyncOutcome::Skipped(reason)
        }
        Ok(input) => match client
          .update_project_item_field(&schema.project_id, &item_id, &field.id, &input)
          .await
        {
          Ok(()) => FieldSyncOutcome::Written,
          Err(err) => {
            warn!("Failed to update project field '{}': {:#}", name, err);
            FieldSyncOutcome::Failed(format!("{err:#}"))
          }
        },
      },
    };
    report.fields.push(FieldSync {
      field: name.to_string(),
      outcome,
    });
  }

  info!(
    "Synced {} of {} fields to project '{}'",
    report.written(),
    report.fields.len(),
    schema.title
  );
  Ok(())
}
