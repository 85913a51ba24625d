//! # GitHub API Client
//!
//! REST calls for creating the mirrored issue and its back-link comment, and
//! GraphQL calls for reading a Projects (V2) board schema and writing item
//! field values.

pub mod client;
pub mod consts;
pub mod endpoints;
pub mod models;

// Re-export the client
pub use client::{GitHubClient, create_github_client};
// Re-export models
pub use models::{
  GitHubAuth, GitHubComment, GitHubIssue, GitHubLabel, GitHubUser, ProjectField, ProjectFieldKind, ProjectFieldValue,
  ProjectSchema, SingleSelectOption,
};
// Re-export endpoints structs
pub use endpoints::issues::CreateIssueParams;
