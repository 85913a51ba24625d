//! Constants for the mirror-gh client

/// Base URL for the official SaaS GitHub API
pub const API_BASE_URL: &str = "https://api.github.com";

/// GraphQL endpoint for the official SaaS GitHub API
pub const GRAPHQL_URL: &str = "https://api.github.com/graphql";

/// User-Agent header value for the GitHub API client
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Accept header value for the GitHub REST API
pub const ACCEPT: &str = "application/vnd.github+json";

/// Pinned REST API version
pub const API_VERSION: &str = "2022-11-28";

/// Name used for GitHub failures in upstream errors
pub const SERVICE_REST: &str = "GitHub";
pub const SERVICE_GRAPHQL: &str = "GitHub GraphQL";

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_user_agent_is_single_product_token() {
    assert_eq!(USER_AGENT, format!("mirror-gh/{}", env!("CARGO_PKG_VERSION")));
  }
}
