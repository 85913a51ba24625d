//! # Google HTTP Client

use anyhow::Result;
use mirror_core::DocsCredentials;
use reqwest::Client;
use tracing::info;

use crate::consts::{DRIVE_BASE_URL, TOKEN_URL};

/// Represents a Google Drive export client
pub struct GoogleDocsClient {
  pub(crate) client: Client,
  pub(crate) token_url: String,
  pub(crate) drive_base_url: String,
  pub(crate) credentials: DocsCredentials,
}

impl GoogleDocsClient {
  /// Create a new client against the public Google endpoints
  pub fn new(credentials: DocsCredentials) -> Self {
    Self {
      client: Client::new(),
      token_url: TOKEN_URL.to_string(),
      drive_base_url: DRIVE_BASE_URL.to_string(),
      credentials,
    }
  }

  /// Point the client at other OAuth and Drive endpoints
  pub fn with_urls(mut self, token_url: &str, drive_base_url: &str) -> Self {
    self.token_url = token_url.to_string();
    self.drive_base_url = drive_base_url.trim_end_matches('/').to_string();
    self
  }

  /// Refresh an access token and export `document_id` as Markdown.
  pub async fn fetch_markdown(&self, document_id: &str) -> Result<String> {
    let token = self.refresh_access_token().await?;
    let markdown = self.export_markdown(&token, document_id).await?;
    info!("Fetched {} bytes of Markdown for document {}", markdown.len(), document_id);
    Ok(markdown)
  }
}

/// Create a Google Docs client from validated credentials
pub fn create_docs_client(credentials: DocsCredentials) -> GoogleDocsClient {
  GoogleDocsClient::new(credentials)
}
