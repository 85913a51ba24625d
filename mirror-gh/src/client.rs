//! # GitHub HTTP Client
//!
//! HTTP client implementation for GitHub API interactions, handling
//! authentication, request building, and response parsing for both the REST
//! and GraphQL endpoints.

use anyhow::Result;
use mirror_core::MirrorError;
use reqwest::{Client, RequestBuilder, Response, header};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::consts::{ACCEPT, API_BASE_URL, API_VERSION, GRAPHQL_URL, USER_AGENT};
use crate::models::GitHubAuth;

/// Represents a GitHub API client
pub struct GitHubClient {
  pub(crate) client: Client,
  pub(crate) base_url: String,
  pub(crate) graphql_url: String,
  pub(crate) auth: GitHubAuth,
}

impl GitHubClient {
  /// Create a new GitHub client against api.github.com
  pub fn new(auth: GitHubAuth) -> Self {
    let client = Client::new();
    Self {
      client,
      base_url: API_BASE_URL.to_string(),
      graphql_url: GRAPHQL_URL.to_string(),
      auth,
    }
  }

  /// Point the client at another REST base URL and GraphQL endpoint, as
  /// GitHub Enterprise runners advertise through `GITHUB_API_URL` and
  /// `GITHUB_GRAPHQL_URL`.
  pub fn with_urls(mut self, base_url: &str, graphql_url: &str) -> Self {
    self.base_url = base_url.trim_end_matches('/').to_string();
    self.graphql_url = graphql_url.to_string();
    self
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Attach the headers every GitHub request carries.
  pub(crate) fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
    builder
      .header(header::ACCEPT, ACCEPT)
      .header(header::USER_AGENT, USER_AGENT)
      .header("X-GitHub-Api-Version", API_VERSION)
      .bearer_auth(&self.auth.token)
  }

  /// Parse a JSON body when `response` has a success status, otherwise turn
  /// it into an upstream error carrying the status and body.
  pub(crate) async fn parse_response<T: DeserializeOwned>(response: Response, service: &str, what: &str) -> Result<T> {
    let status = response.status();
    debug!("{} response status for {}: {}", service, what, status);

    let body = response
      .text()
      .await
      .map_err(|e| MirrorError::upstream(service, Some(status.as_u16()), format!("Failed to read {what}: {e}")))?;

    if status.is_success() {
      return serde_json::from_str::<T>(&body).map_err(|e| {
        MirrorError::upstream(service, Some(status.as_u16()), format!("Failed to parse {what}: {e}")).into()
      });
    }

    if matches!(status, reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN) {
      warn!("Authentication failed when accessing {}", service);
    } else {
      warn!("Unexpected {} error: HTTP {} - {}", service, status, body);
    }
    Err(MirrorError::upstream(service, Some(status.as_u16()), body).into())
  }
}

/// Create a GitHub client from a token
pub fn create_github_client(token: &str) -> Result<GitHubClient> {
  if token.trim().is_empty() {
    return Err(MirrorError::invalid("GitHub token", "is blank").into());
  }
  let auth = GitHubAuth {
    token: token.to_string(),
  };

  Ok(GitHubClient::new(auth))
}

#[cfg(test)]
mod tests {
  use wiremock::matchers::{header, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use super::*;
  use crate::models::GitHubUser;

  /// Test that GitHub client can be created with a token
  #[tokio::test]
  async fn test_github_client_creation() -> Result<()> {
    let client = create_github_client("test_token")?;

    assert_eq!(client.base_url, "https://api.github.com");
    assert_eq!(client.graphql_url, "https://api.github.com/graphql");
    assert_eq!(client.auth.token, "test_token");

    Ok(())
  }

  #[test]
  fn test_blank_token_rejected() {
    assert!(create_github_client("  ").is_err());
  }

  #[test]
  fn test_with_urls_trims_trailing_slash() {
    let client = create_github_client("t")
      .unwrap()
      .with_urls("https://ghe.example.com/api/v3/", "https://ghe.example.com/api/graphql");
    assert_eq!(client.base_url(), "https://ghe.example.com/api/v3");
    assert_eq!(client.graphql_url, "https://ghe.example.com/api/graphql");
  }

  /// Test that requests carry the bearer token and API headers
  #[tokio::test]
  async fn test_github_client_auth() -> Result<()> {
    let mock_server = MockServer::start().await;
    let client = create_github_client("test_token")?.with_urls(&mock_server.uri(), "unused");

    Mock::given(method("GET"))
      .and(path("/user"))
      .and(header("Authorization", "Bearer test_token"))
      .and(header("Accept", ACCEPT))
      .and(header("X-GitHub-Api-Version", API_VERSION))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
          "login": "testuser",
          "id": 1234
      })))
      .expect(1)
      .mount(&mock_server)
      .await;

    let response = client
      .authorized(client.client.get(format!("{}/user", client.base_url)))
      .send()
      .await?;
    let user: GitHubUser = GitHubClient::parse_response(response, "GitHub", "user").await?;

    assert_eq!(user.login, "testuser");
    Ok(())
  }

  #[tokio::test]
  async fn test_error_status_becomes_upstream_error() -> Result<()> {
    let mock_server = MockServer::start().await;
    let client = create_github_client("bad_token")?.with_urls(&mock_server.uri(), "unused");

    Mock::given(method("GET"))
      .and(path("/user"))
      .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"message":"Bad credentials"}"#))
      .mount(&mock_server)
      .await;

    let response = client
      .authorized(client.client.get(format!("{}/user", client.base_url)))
      .send()
      .await?;
    let err = GitHubClient::parse_response::<GitHubUser>(response, "GitHub", "user")
      .await
      .unwrap_err();

    match err.downcast_ref::<MirrorError>() {
      Some(MirrorError::Upstream { status, body, .. }) => {
        assert_eq!(*status, Some(401));
        assert!(body.contains("Bad credentials"));
      }
      other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
  }
}
