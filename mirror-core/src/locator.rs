//! # Document Locator
//!
//! Finds the Google Doc linked from an issue description.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::consts::GOOGLE_DOC_URL_PREFIX;

static GOOGLE_DOC_REGEX: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"docs\.google\.com/document/d/([A-Za-z0-9_-]+)").expect("Failed to compile Google Doc regex")
});

/// Identifier of a Google Doc as it appears in the document URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentId(String);

impl DocumentId {
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Canonical link to the document, without any `/edit` suffix.
  pub fn url(&self) -> String {
    format!("{GOOGLE_DOC_URL_PREFIX}{}", self.0)
  }
}

impl fmt::Display for DocumentId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Return the first Google Doc identifier in `description`, if any.
pub fn locate_document_id(description: &str) -> Option<DocumentId> {
  GOOGLE_DOC_REGEX
    .captures(description)
    .and_then(|captures| captures.get(1))
    .map(|id| DocumentId(id.as_str().to_string()))
}
