//! OAuth refresh-token exchange.
//!
//! The action stores a long-lived refresh token; every run trades it for a
//! fresh access token before talking to Drive.

use anyhow::Result;
use mirror_core::MirrorError;
use reqwest::header;
use tracing::{debug, instrument, warn};

use crate::client::GoogleDocsClient;
use crate::consts::{SERVICE_OAUTH, USER_AGENT};
use crate::models::{AccessToken, OAuthErrorBody};

impl GoogleDocsClient {
  /// Exchange the configured refresh token for an access token.
  ///
  /// # Errors
  ///
  /// Returns an upstream error with the HTTP status and body when Google
  /// rejects the exchange (for example `invalid_grant` after revocation).
  #[instrument(skip(self), level = "debug")]
  pub async fn refresh_access_token(&self) -> Result<AccessToken> {
    debug!("Refreshing Google access token for client {}", self.credentials.client_id);

    let params = [
      ("grant_type", "refresh_token"),
      ("client_id", self.credentials.client_id.as_str()),
      ("client_secret", self.credentials.client_secret.as_str()),
      ("refresh_token", self.credentials.refresh_token.as_str()),
    ];

    let response = self
      .client
      .post(&self.token_url)
      .header(header::ACCEPT, "application/json")
      .header(header::USER_AGENT, USER_AGENT)
      .form(&params)
      .send()
      .await
      .map_err(|e| MirrorError::upstream(SERVICE_OAUTH, None, format!("POST {} failed: {e}", self.token_url)))?;

    let status = response.status();
    let body = response.text().await.map_err(|e| {
      MirrorError::upstream(SERVICE_OAUTH, Some(status.as_u16()), format!("Failed to read token response: {e}"))
    })?;

    if !status.is_success() {
      // Prefer the structured OAuth error, fall back to the raw body
      let detail = match serde_json::from_str::<OAuthErrorBody>(&body) {
        Ok(err) => match err.error_description {
          Some(description) => format!("{}: {}", err.error, description),
          None => err.error,
        },
        Err(_) => body,
      };
      warn!("Token refresh failed: HTTP {} - {}", status, detail);
      return Err(MirrorError::upstream(SERVICE_OAUTH, Some(status.as_u16()), detail).into());
    }

    let token = serde_json::from_str::<AccessToken>(&body).map_err(|e| {
      MirrorError::upstream(SERVICE_OAUTH, Some(status.as_u16()), format!("Failed to parse token response: {e}"))
    })?;
    if token.access_token.trim().is_empty() {
      return Err(MirrorError::upstream(SERVICE_OAUTH, Some(status.as_u16()), "empty access token").into());
    }

    debug!("Obtained access token expiring in {:?}s", token.expires_in);
    Ok(token)
  }
}
