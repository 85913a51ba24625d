//! # Field Extractor
//!
//! Pulls single values out of the two-column tables of an exported incident
//! report. Each lookup scans the whole document for a row shaped like
//! `| **Field Name** | value |`.

use std::fmt;

use regex::{Regex, RegexBuilder};
use serde::{Serialize, Serializer};
use tracing::{trace, warn};

use crate::consts::{NOT_FOUND, NOT_SPECIFIED};

/// Cell values that mean "nobody filled this in".
const PLACEHOLDERS: [&str; 3] = ["SELECT", "", "N/A"];

/// Result of looking up one field in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
  Found(String),
  /// The row exists but holds a placeholder.
  NotSpecified,
  /// No row with that label exists.
  NotFound,
}

impl FieldValue {
  /// The value to show or serialize, with sentinels for the absent cases.
  pub fn as_display(&self) -> &str {
    match self {
      Self::Found(value) => value,
      Self::NotSpecified => NOT_SPECIFIED,
      Self::NotFound => NOT_FOUND,
    }
  }

  /// The extracted text when there is something worth writing elsewhere.
  pub fn usable(&self) -> Option<&str> {
    match self {
      Self::Found(value) if !value.trim().is_empty() => Some(value),
      _ => None,
    }
  }

  pub const fn is_found(&self) -> bool {
    matches!(self, Self::Found(_))
  }

  /// Replace a missing row with `fallback`.
  pub fn or_else_found(self, fallback: impl FnOnce() -> Option<String>) -> Self {
    match self {
      Self::NotFound => fallback().map_or(Self::NotFound, Self::Found),
      other => other,
    }
  }
}

impl fmt::Display for FieldValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_display())
  }
}

impl Serialize for FieldValue {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.as_display())
  }
}

/// Emphasis markup Google Docs may wrap a label in.
const MARKUP: &str = r"(?:\*{1,2}|_{1,2}|</?u>|[ \t])*";

fn row_pattern(field_name: &str) -> Option<Regex> {
  let pattern = format!(
    r"^[ \t]*\|{MARKUP}{name}{MARKUP}\|[ \t]*([^|\r\n]*?)[ \t]*(?:\||\r?$)",
    name = regex::escape(field_name.trim())
  );
  match RegexBuilder::new(&pattern).case_insensitive(true).multi_line(true).build() {
    Ok(regex) => Some(regex),
    Err(e) => {
      warn!("Cannot build row pattern for '{}': {}", field_name, e);
      None
    }
  }
}

/// Look up the value of the table row labelled `field_name`.
pub fn extract_field(markdown: &str, field_name: &str) -> FieldValue {
  let value = row_pattern(field_name)
    .as_ref()
    .and_then(|pattern| pattern.captures(markdown))
    .and_then(|captures| captures.get(1))
    .map(|cell| cell.as_str().trim());

  let result = match value {
    None => FieldValue::NotFound,
    Some(cell) if PLACEHOLDERS.contains(&cell) => FieldValue::NotSpecified,
    Some(cell) => FieldValue::Found(cell.to_string()),
  };
  trace!("Extracted '{}' => {:?}", field_name, result);
  result
}
