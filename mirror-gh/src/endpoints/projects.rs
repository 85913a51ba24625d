//! # Projects (V2) Endpoints
//!
//! Board schema lookup, item attachment and per-field value updates.

use std::collections::HashMap;

use anyhow::Result;
use mirror_core::{MirrorError, ProjectOwnerKind};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, instrument};

use crate::client::GitHubClient;
use crate::consts::SERVICE_GRAPHQL;
use crate::models::{ProjectField, ProjectFieldKind, ProjectFieldValue, ProjectSchema, SingleSelectOption};

/// `OWNER_FIELD` is replaced by `organization` or `user`.
const PROJECT_SCHEMA_QUERY: &str = r#"
query($login: String!, $number: Int!) {
  owner: OWNER_FIELD(login: $login) {
    projectV2(number: $number) {
      id
      title
      fields(first: 100) {
        nodes {
          ... on ProjectV2FieldCommon { id name dataType }
          ... on ProjectV2SingleSelectField { options { id name } }
        }
      }
    }
  }
}"#;

const ADD_ITEM_MUTATION: &str = r#"
mutation($projectId: ID!, $contentId: ID!) {
  addProjectV2ItemById(input: { projectId: $projectId, contentId: $contentId }) {
    item { id }
  }
}"#;

const UPDATE_FIELD_MUTATION: &str = r#"
mutation($projectId: ID!, $itemId: ID!, $fieldId: ID!, $value: ProjectV2FieldValue!) {
  updateProjectV2ItemFieldValue(
    input: { projectId: $projectId, itemId: $itemId, fieldId: $fieldId, value: $value }
  ) {
    projectV2Item { id }
  }
}"#;

#[derive(Debug, Deserialize)]
struct SchemaData {
  owner: Option<OwnerNode>,
}

#[derive(Debug, Deserialize)]
struct OwnerNode {
  #[serde(rename = "projectV2")]
  project: Option<ProjectNode>,
}

#[derive(Debug, Deserialize)]
struct ProjectNode {
  id: String,
  #[serde(default)]
  title: String,
  fields: FieldConnection,
}

#[derive(Debug, Deserialize)]
struct FieldConnection {
  #[serde(default)]
  nodes: Vec<Option<FieldNode>>,
}

#[derive(Debug, Deserialize)]
struct FieldNode {
  id: Option<String>,
  name: Option<String>,
  #[serde(rename = "dataType")]
  data_type: Option<String>,
  #[serde(default)]
  options: Vec<SingleSelectOption>,
}

#[derive(Debug, Deserialize)]
struct AddItemData {
  #[serde(rename = "addProjectV2ItemById")]
  add: AddItemPayload,
}

#[derive(Debug, Deserialize)]
struct AddItemPayload {
  item: Option<ItemNode>,
}

#[derive(Debug, Deserialize)]
struct ItemNode {
  id: String,
}

#[derive(Debug, Deserialize)]
struct UpdateFieldData {
  #[serde(rename = "updateProjectV2ItemFieldValue")]
  update: UpdateFieldPayload,
}

#[derive(Debug, Deserialize)]
struct UpdateFieldPayload {
  #[serde(rename = "projectV2Item")]
  item: Option<ItemNode>,
}

impl GitHubClient {
  /// Fetch the field schema of board `number` owned by `login`.
  #[instrument(skip(self), level = "debug")]
  pub async fn get_project_schema(&self, owner_kind: ProjectOwnerKind, login: &str, number: u32) -> Result<ProjectSchema> {
    info!("Fetching schema of project #{} for {} {}", number, owner_kind.graphql_field(), login);

    let query = PROJECT_SCHEMA_QUERY.replace("OWNER_FIELD", owner_kind.graphql_field());
    let data: SchemaData = self
      .graphql("projectSchema", &query, json!({ "login": login, "number": number }))
      .await?;

    let project = data.owner.and_then(|owner| owner.project).ok_or_else(|| {
      MirrorError::upstream(
        SERVICE_GRAPHQL,
        None,
        format!("project #{number} not found for {login}"),
      )
    })?;

    let fields: HashMap<String, ProjectField> = project
      .fields
      .nodes
      .into_iter()
      .flatten()
      .filter_map(|node| {
        let (id, name, data_type) = (node.id?, node.name?, node.data_type?);
        let field = ProjectField {
          id,
          name: name.clone(),
          kind: ProjectFieldKind::from_data_type(&data_type),
          options: node.options,
        };
        Some((name, field))
      })
      .collect();

    debug!("Project '{}' has {} fields", project.title, fields.len());
    Ok(ProjectSchema {
      project_id: project.id,
      title: project.title,
      fields,
    })
  }

  /// Attach an issue or pull request (by node id) to a board, returning the
  /// board item id. Attaching content that is already on the board returns
  /// the existing item.
  #[instrument(skip(self), level = "debug")]
  pub async fn add_project_item(&self, project_id: &str, content_id: &str) -> Result<String> {
    info!("Adding {} to project {}", content_id, project_id);

    let data: AddItemData = self
      .graphql(
        "addProjectV2ItemById",
        ADD_ITEM_MUTATION,
        json!({ "projectId": project_id, "contentId": content_id }),
      )
      .await?;

    let item = data.add.item.ok_or_else(|| {
      MirrorError::upstream(SERVICE_GRAPHQL, None, "addProjectV2ItemById returned no item")
    })?;
    debug!("Project item id: {}", item.id);
    Ok(item.id)
  }

  /// Write one field value on a board item.
  #[instrument(skip(self), level = "debug")]
  pub async fn update_project_item_field(
    &self,
    project_id: &str,
    item_id: &str,
    field_id: &str,
    value: &ProjectFieldValue,
  ) -> Result<()> {
    let data: UpdateFieldData = self
      .graphql(
        "updateProjectV2ItemFieldValue",
        UPDATE_FIELD_MUTATION,
        json!({
          "projectId": project_id,
          "itemId": item_id,
          "fieldId": field_id,
          "value": value,
        }),
      )
      .await?;

    match data.update.item {
      Some(item) => {
        debug!("Updated field {} on item {}", field_id, item.id);
        Ok(())
      }
      None => Err(MirrorError::upstream(SERVICE_GRAPHQL, None, "updateProjectV2ItemFieldValue returned no item").into()),
    }
  }
}
