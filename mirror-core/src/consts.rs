//! Constants shared across the incident mirror crates.

/// Path of the JSON file holding the triggering event payload.
pub const ENV_EVENT_PATH: &str = "GITHUB_EVENT_PATH";
/// Root directory the template path is resolved against.
pub const ENV_WORKSPACE: &str = "GITHUB_WORKSPACE";
/// File that receives step outputs.
pub const ENV_OUTPUT: &str = "GITHUB_OUTPUT";
/// REST API base URL override, set by the Actions runner.
pub const ENV_GITHUB_API_URL: &str = "GITHUB_API_URL";
/// GraphQL endpoint override, set by the Actions runner.
pub const ENV_GITHUB_GRAPHQL_URL: &str = "GITHUB_GRAPHQL_URL";

pub const ENV_GCP_CLIENT_ID: &str = "GCP_CLIENT_ID";
pub const ENV_GCP_CLIENT_SECRET: &str = "GCP_CLIENT_SECRET";
pub const ENV_GCP_REFRESH_TOKEN: &str = "GCP_REFRESH_TOKEN";

pub const ENV_TARGET_REPO_OWNER: &str = "TARGET_REPO_OWNER";
pub const ENV_TARGET_REPO_NAME: &str = "TARGET_REPO_NAME";
pub const ENV_TARGET_REPO_TOKEN: &str = "TARGET_REPO_TOKEN";
pub const ENV_PROJECT_NUMBER: &str = "PROJECT_NUMBER";
pub const ENV_PROJECT_OWNER_TYPE: &str = "PROJECT_OWNER_TYPE";

/// Token used for the back-link comment on the source issue. Falls back to
/// `GITHUB_TOKEN` and finally to the target repository token.
pub const ENV_SOURCE_REPO_TOKEN: &str = "SOURCE_REPO_TOKEN";
pub const ENV_GITHUB_TOKEN: &str = "GITHUB_TOKEN";

/// Template location relative to the workspace root.
pub const DEFAULT_TEMPLATE_PATH: &str = "templates/mirrored-incident.md";

/// Label added to every mirrored issue on top of the source labels.
pub const MIRROR_LABEL: &str = "mirrored-incident";

/// Sentinel for a field whose row is missing from the document.
pub const NOT_FOUND: &str = "Not Found";
/// Sentinel for a field whose row holds a placeholder value.
pub const NOT_SPECIFIED: &str = "Not Specified";

/// Author shown in the mirrored body when the event has no user.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Prefix of the canonical document link stored as the attachment.
pub const GOOGLE_DOC_URL_PREFIX: &str = "https://docs.google.com/document/d/";
