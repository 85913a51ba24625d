use std::fmt;

use serde::Deserialize;

/// Short-lived OAuth access token
#[derive(Clone, Deserialize)]
pub struct AccessToken {
  pub access_token: String,
  #[serde(default)]
  pub expires_in: Option<u64>,
  #[serde(default)]
  pub token_type: Option<String>,
  #[serde(default)]
  pub scope: Option<String>,
}

impl fmt::Debug for AccessToken {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("AccessToken")
      .field("access_token", &"<redacted>")
      .field("expires_in", &self.expires_in)
      .field("token_type", &self.token_type)
      .field("scope", &self.scope)
      .finish()
  }
}

/// Error body returned by the OAuth endpoint, e.g. `invalid_grant`
#[derive(Debug, Deserialize)]
pub struct OAuthErrorBody {
  pub error: String,
  #[serde(default)]
  pub error_description: Option<String>,
}
