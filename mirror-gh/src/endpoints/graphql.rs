//! Raw GraphQL transport.

use anyhow::Result;
use mirror_core::MirrorError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::client::GitHubClient;
use crate::consts::SERVICE_GRAPHQL;
use crate::models::GraphQlResponse;

impl GitHubClient {
  /// Execute a GraphQL document and decode its `data`.
  ///
  /// A response with a non-empty `errors` array is a failure even when it
  /// also carries partial data.
  #[instrument(skip(self, query, variables), level = "debug")]
  pub async fn graphql<T: DeserializeOwned>(&self, operation: &str, query: &str, variables: Value) -> Result<T> {
    debug!("GraphQL {} with variables {}", operation, variables);

    let response = self
      .authorized(self.client.post(&self.graphql_url))
      .json(&serde_json::json!({ "query": query, "variables": variables }))
      .send()
      .await
      .map_err(|e| MirrorError::upstream(SERVICE_GRAPHQL, None, format!("POST {} failed: {e}", self.graphql_url)))?;

    let envelope: GraphQlResponse<T> = Self::parse_response(response, SERVICE_GRAPHQL, operation).await?;

    if !envelope.errors.is_empty() {
      let messages = envelope
        .errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");
      warn!("GraphQL {} returned errors: {}", operation, messages);
      return Err(MirrorError::upstream(SERVICE_GRAPHQL, None, format!("{operation}: {messages}")).into());
    }

    envelope
      .data
      .ok_or_else(|| MirrorError::upstream(SERVICE_GRAPHQL, None, format!("{operation}: response has no data")).into())
  }
}
