//! # GitHub API Endpoints
//!
//! Endpoint implementations grouped by resource: REST issues and comments,
//! the raw GraphQL transport, and Projects (V2) operations built on it.

pub mod graphql;
pub mod issues;
pub mod projects;
