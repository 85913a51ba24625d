//! # Run Pipeline
//!
//! One strictly sequential pass: normalize the event, locate the document,
//! check configuration, fetch and extract, render, publish, then sync the
//! board. Every network call is awaited before the next one starts.

use std::path::PathBuf;

use anyhow::{Context, Result};
use mirror_core::output::StepOutputs;
use mirror_core::template::load_template;
use mirror_core::{
  DocsCredentials, EnvSource, IncidentDetails, IssueRecord, MirrorTarget, TemplateValues, locate_document_id,
  render_template,
};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::clients::{Endpoints, create_google_client, create_source_client, create_target_client};
use crate::publish::{MirrorIssue, publish_mirror};
use crate::sync::{SyncReport, sync_project};

/// Everything produced by a run that mirrored an incident.
#[derive(Debug, Clone)]
pub struct MirroredRun {
  pub issue_number: u64,
  pub details: IncidentDetails,
  pub mirror: MirrorIssue,
  pub sync: SyncReport,
}

#[derive(Debug, Clone)]
pub enum RunOutcome {
  /// The issue description links no Google Doc; nothing was fetched.
  NoDocument { issue_number: u64 },
  Mirrored(Box<MirroredRun>),
}

impl RunOutcome {
  /// Step outputs for downstream workflow steps.
  pub fn outputs(&self) -> Result<StepOutputs> {
    let mut outputs = StepOutputs::new();
    match self {
      Self::NoDocument { .. } => outputs.set("status", "no-document"),
      Self::Mirrored(run) => {
        outputs.set("status", "mirrored");
        outputs.set(
          "incident_details",
          run
            .details
            .to_json()
            .context("Failed to serialize incident details")?,
        );
        outputs.set("mirror_issue_number", run.mirror.number.to_string());
        outputs.set("mirror_issue_url", run.mirror.url.as_str());
        if let Some(item_id) = &run.sync.item_id {
          outputs.set("project_item_id", item_id.as_str());
        }
      }
    }
    Ok(outputs)
  }
}

/// A configured pipeline, ready to process one event.
pub struct Pipeline<E: EnvSource> {
  env: E,
  endpoints: Endpoints,
  template_path: PathBuf,
}

impl<E: EnvSource> Pipeline<E> {
  pub fn new(env: E, endpoints: Endpoints, template_path: PathBuf) -> Self {
    Self {
      env,
      endpoints,
      template_path,
    }
  }

  /// Process one issue event payload.
  pub async fn run(&self, payload: &Value) -> Result<RunOutcome> {
    let issue = IssueRecord::from_event(payload)?;
    info!("Processing {}#{}: {}", issue.source_repo_name, issue.number, issue.title);

    let Some(document) = locate_document_id(&issue.description) else {
      warn!("Issue #{} does not link a Google Doc; nothing to mirror", issue.number);
      return Ok(RunOutcome::NoDocument {
        issue_number: issue.number,
      });
    };
    info!("Found incident document {}", document);

    // Configuration for every later phase is checked before any network call
    let credentials = DocsCredentials::from_env(&self.env)?;
    let target = MirrorTarget::from_env(&self.env)?;
    let template = load_template(&self.template_path)?;
    debug!("Mirroring into {} with project #{}", target.full_name(), target.project_number);

    let markdown = create_google_client(credentials, &self.endpoints)
      .fetch_markdown(document.as_str())
      .await
      .with_context(|| format!("Failed to fetch incident document {document}"))?;

    let details = IncidentDetails::extract(&markdown, &issue, &document);
    let body = render_template(&template, &TemplateValues::for_incident(&issue, &details));

    let target_client = create_target_client(&target, &self.endpoints)?;
    let source_client = create_source_client(&target, &self.endpoints)?;
    let mirror = publish_mirror(&target_client, &source_client, &target, &issue, body).await?;

    let sync = sync_project(&target_client, &target, &mirror.node_id, &details).await;

    Ok(RunOutcome::Mirrored(Box::new(MirroredRun {
      issue_number: issue.number,
      details,
      mirror,
      sync,
    })))
  }
}
