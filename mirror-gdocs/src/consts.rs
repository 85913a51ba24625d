//! Constants for the mirror-gdocs client

/// OAuth 2.0 token endpoint
pub const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Drive API v3 base URL
pub const DRIVE_BASE_URL: &str = "https://www.googleapis.com/drive/v3";

/// Export format requested from Drive
pub const MARKDOWN_MIME_TYPE: &str = "text/markdown";

/// User-Agent header value for Google requests
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Name used for Google failures in upstream errors
pub const SERVICE_OAUTH: &str = "Google OAuth";
pub const SERVICE_DRIVE: &str = "Google Drive export";

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_user_agent_is_single_product_token() {
    assert_eq!(USER_AGENT, format!("mirror-gdocs/{}", env!("CARGO_PKG_VERSION")));
  }
}
