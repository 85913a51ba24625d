//! # Incident Mirror Core
//!
//! Network-free building blocks of the incident mirror: normalizing the issue
//! event payload, locating the linked Google Doc, pulling incident fields out
//! of the exported Markdown, and rendering the mirrored issue body.

pub mod config;
pub mod consts;
pub mod dates;
pub mod error;
pub mod extract;
pub mod incident;
pub mod issue;
pub mod locator;
pub mod output;
pub mod template;

pub use config::{DocsCredentials, EnvSource, MirrorTarget, ProcessEnv, ProjectOwnerKind};
pub use dates::{normalize_date, parse_incident_date};
pub use error::MirrorError;
pub use extract::{FieldValue, extract_field};
pub use incident::IncidentDetails;
pub use issue::{IssueRecord, IssueState};
pub use locator::{DocumentId, locate_document_id};
pub use template::{TemplateValues, render_template};
