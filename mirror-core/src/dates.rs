//! # Date Normalizer
//!
//! Coerces loosely written dates from the incident report into strict
//! `YYYY-MM-DD` form. Only real calendar dates survive.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::extract::FieldValue;

static DATE_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(\d{4})-(\d{2})-(\d{2})").expect("Failed to compile date regex"));

/// Strict output format for normalized dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse the first `YYYY-MM-DD` substring of `input` as a calendar date.
///
/// Returns `None` when there is no such substring, when it names an
/// impossible date such as `2024-02-30`, or when formatting the parsed date
/// does not reproduce the original digits.
pub fn parse_incident_date(input: &str) -> Option<NaiveDate> {
  let captures = DATE_REGEX.captures(input)?;
  let matched = captures.get(0)?.as_str();

  let year = captures.get(1)?.as_str().parse::<i32>().ok()?;
  let month = captures.get(2)?.as_str().parse::<u32>().ok()?;
  let day = captures.get(3)?.as_str().parse::<u32>().ok()?;

  let date = NaiveDate::from_ymd_opt(year, month, day)?;
  (date.format(DATE_FORMAT).to_string() == matched).then_some(date)
}

/// Normalize an extracted field to `YYYY-MM-DD`, or `None` for sentinels and
/// unusable text.
pub fn normalize_date(value: &FieldValue) -> Option<String> {
  value
    .usable()
    .and_then(parse_incident_date)
    .map(|date| date.format(DATE_FORMAT).to_string())
}

/// True when `value` is already in strict `YYYY-MM-DD` form.
pub fn is_strict_date(value: &str) -> bool {
  parse_incident_date(value).is_some_and(|date| date.format(DATE_FORMAT).to_string() == value)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn found(text: &str) -> FieldValue {
    FieldValue::Found(text.to_string())
  }

  #[test]
  fn test_plain_date() {
    assert_eq!(normalize_date(&found("2024-03-15")), Some("2024-03-15".to_string()));
  }

  #[test]
  fn test_date_inside_text() {
    assert_eq!(
      normalize_date(&found("Opened 2024-03-15 09:12 UTC")),
      Some("2024-03-15".to_string())
    );
  }

  #[test]
  fn test_invalid_calendar_dates() {
    assert_eq!(normalize_date(&found("Incident reported on 2024-02-30")), None);
    assert_eq!(normalize_date(&found("2023-02-29")), None);
    assert_eq!(normalize_date(&found("2024-04-31")), None);
    assert_eq!(normalize_date(&found("2024-13-01")), None);
    assert_eq!(normalize_date(&found("2024-00-10")), None);
  }

  #[test]
  fn test_leap_day() {
    assert_eq!(normalize_date(&found("2024-02-29")), Some("2024-02-29".to_string()));
  }

  #[test]
  fn test_sentinels_and_noise() {
    assert_eq!(normalize_date(&FieldValue::NotFound), None);
    assert_eq!(normalize_date(&FieldValue::NotSpecified), None);
    assert_eq!(normalize_date(&found("March 15, 2024")), None);
    assert_eq!(normalize_date(&found("15/03/2024")), None);
  }

  #[test]
  fn test_literal_sentinel_text_is_not_a_date() {
    assert_eq!(normalize_date(&found("Not Found")), None);
    assert_eq!(parse_incident_date("Not Found"), None);
  }

  #[test]
  fn test_only_first_match_counts() {
    assert_eq!(parse_incident_date("2024-02-30 then 2024-03-01"), None);
  }

  #[test]
  fn test_is_strict_date() {
    assert!(is_strict_date("2024-03-15"));
    assert!(!is_strict_date("2024-03-15T10:00:00Z"));
    assert!(!is_strict_date(" 2024-03-15"));
    assert!(!is_strict_date("2024-02-30"));
  }
}
