//! # Google Docs Export Client
//!
//! Exchanges a stored OAuth refresh token for an access token and exports a
//! Google Doc as Markdown through the Drive API.

pub mod auth;
pub mod client;
pub mod consts;
pub mod endpoints;
pub mod models;

pub use client::{GoogleDocsClient, create_docs_client};
pub use models::AccessToken;
