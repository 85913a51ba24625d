//! Drive `files.export` endpoint.

use anyhow::{Context, Result};
use mirror_core::MirrorError;
use reqwest::header;
use tracing::{debug, info, instrument, trace, warn};
use url::Url;

use crate::client::GoogleDocsClient;
use crate::consts::{MARKDOWN_MIME_TYPE, SERVICE_DRIVE, USER_AGENT};
use crate::models::AccessToken;

impl GoogleDocsClient {
  /// Build the export URL for `document_id`.
  pub(crate) fn export_url(&self, document_id: &str) -> Result<Url> {
    let mut url = Url::parse(&self.drive_base_url).with_context(|| format!("Invalid Drive URL {}", self.drive_base_url))?;
    url
      .path_segments_mut()
      .map_err(|()| anyhow::anyhow!("Drive URL {} cannot carry a path", self.drive_base_url))?
      .pop_if_empty()
      .extend(["files", document_id, "export"]);
    url.query_pairs_mut().append_pair("mimeType", MARKDOWN_MIME_TYPE);
    Ok(url)
  }

  /// Export a Google Doc rendered as Markdown.
  ///
  /// # Errors
  ///
  /// Returns an upstream error with the HTTP status and body when Drive
  /// refuses the export, for example when the document is not shared with
  /// the OAuth client (404) or the token lacks the Drive scope (403).
  #[instrument(skip(self, token), level = "debug")]
  pub async fn export_markdown(&self, token: &AccessToken, document_id: &str) -> Result<String> {
    info!("Exporting document {} as Markdown", document_id);

    let url = self.export_url(document_id)?;
    trace!("Drive export URL: {}", url);

    let response = self
      .client
      .get(url.clone())
      .header(header::USER_AGENT, USER_AGENT)
      .bearer_auth(&token.access_token)
      .send()
      .await
      .map_err(|e| MirrorError::upstream(SERVICE_DRIVE, None, format!("GET {url} failed: {e}")))?;

    let status = response.status();
    debug!("Drive export response status: {}", status);
    let body = response
      .text()
      .await
      .map_err(|e| MirrorError::upstream(SERVICE_DRIVE, Some(status.as_u16()), format!("Failed to read export body: {e}")))?;

    if !status.is_success() {
      warn!("Drive export failed: HTTP {} - {}", status, body);
      return Err(MirrorError::upstream(SERVICE_DRIVE, Some(status.as_u16()), body).into());
    }

    Ok(body)
  }
}

#[cfg(test)]
mod tests {
  use mirror_core::DocsCredentials;
  use wiremock::matchers::{header, method, path, query_param};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use super::*;
  use crate::create_docs_client;

  fn token() -> AccessToken {
    AccessToken {
      access_token: "ya29.token".into(),
      expires_in: Some(3599),
      token_type: Some("Bearer".into()),
      scope: None,
    }
  }

  fn client_for(base: &str) -> GoogleDocsClient {
    create_docs_client(DocsCredentials {
      client_id: "c".into(),
      client_secret: "s".into(),
      refresh_token: "r".into(),
    })
    .with_urls("http://unused/token", base)
  }

  #[test]
  fn test_export_url() {
    let client = client_for("https://www.googleapis.com/drive/v3");
    assert_eq!(
      client.export_url("1a-B_c").unwrap().as_str(),
      "https://www.googleapis.com/drive/v3/files/1a-B_c/export?mimeType=text%2Fmarkdown"
    );
  }

  #[tokio::test]
  async fn test_export_markdown() -> Result<()> {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/files/ABC123/export"))
      .and(query_param("mimeType", "text/markdown"))
      .and(header("authorization", "Bearer ya29.token"))
      .respond_with(ResponseTemplate::new(200).set_body_string("# Incident\n| **Priority** | P1 |\n"))
      .expect(1)
      .mount(&mock_server)
      .await;

    let markdown = client_for(&mock_server.uri()).export_markdown(&token(), "ABC123").await?;
    assert!(markdown.contains("| **Priority** | P1 |"));
    Ok(())
  }

  #[tokio::test]
  async fn test_export_not_found() -> Result<()> {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/files/MISSING/export"))
      .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"error":{"code":404,"message":"File not found: MISSING."}}"#))
      .mount(&mock_server)
      .await;

    let err = client_for(&mock_server.uri())
      .export_markdown(&token(), "MISSING")
      .await
      .unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("Google Drive export request failed with HTTP 404"), "{message}");
    assert!(message.contains("File not found: MISSING."), "{message}");
    Ok(())
  }
}
