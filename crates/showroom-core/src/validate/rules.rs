//! Single-value checks. Pure logic; no knowledge of forms or fields.

use std::{borrow::Cow, sync::LazyLock};

use regex::Regex;
use url::Url;
use validator::ValidateEmail;

/// Digits, whitespace, `-`, `+`, `(` and `)` only.
static PHONE_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[\d\s\-\+\(\)]+$").expect("valid regex"));

const URL_SCHEMES: [&str; 3] = ["http", "https", "ftp"];

/// What a [`Rule`] tests. Numeric checks other than [`Check::Number`] pass on
/// text that does not parse; put `Number` earlier in the chain to catch that.
#[derive(Debug, Clone, PartialEq)]
pub enum Check {
  MinChars(usize),
  MaxChars(usize),
  Number,
  Integer,
  Positive,
  AtLeast(f64),
  AtMost(f64),
  Phone,
  MinDigits(usize),
  Email,
  Url,
  /// Exact match against one of a fixed set of values.
  OneOf(&'static [&'static str]),
}

impl Check {
  /// `value` is already trimmed and non-empty.
  pub fn passes(&self, value: &str) -> bool {
    match self {
      Self::MinChars(min) => value.chars().count() >= *min,
      Self::MaxChars(max) => value.chars().count() <= *max,
      Self::Number => parse_number(value).is_some(),
      Self::Integer => parse_number(value).is_none_or(|n| n.fract() == 0.0),
      Self::Positive => parse_number(value).is_none_or(|n| n > 0.0),
      Self::AtLeast(min) => parse_number(value).is_none_or(|n| n >= *min),
      Self::AtMost(max) => parse_number(value).is_none_or(|n| n <= *max),
      Self::Phone => PHONE_RE.is_match(value),
      Self::MinDigits(min) => {
        value.chars().filter(char::is_ascii_digit).count() >= *min
      }
      Self::Email => value.validate_email(),
      Self::Url => is_listing_url(value),
      Self::OneOf(allowed) => allowed.contains(&value),
    }
  }
}

/// A check paired with the message shown when it fails.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
  pub check:   Check,
  pub message: Cow<'static, str>,
}

impl Rule {
  pub fn new(check: Check, message: impl Into<Cow<'static, str>>) -> Self {
    Self {
      check,
      message: message.into(),
    }
  }
}

/// Finite decimal number, as typed into a form.
pub fn parse_number(value: &str) -> Option<f64> {
  value.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn is_listing_url(value: &str) -> bool {
  Url::parse(value).is_ok_and(|url| {
    URL_SCHEMES.contains(&url.scheme())
      && url.host_str().is_some_and(|h| !h.is_empty())
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn char_counts_use_scalar_values() {
    // Six bytes, five characters.
    assert!(Check::MaxChars(5).passes("Škoda"));
    assert!(Check::MinChars(5).passes("Škoda"));
    assert!(!Check::MaxChars(4).passes("Škoda"));
  }

  #[test]
  fn numeric_checks() {
    assert!(Check::Number.passes("2020"));
    assert!(Check::Number.passes("19.5"));
    assert!(!Check::Number.passes("twenty"));
    assert!(!Check::Number.passes("inf"));
    assert!(Check::Integer.passes("2020"));
    assert!(!Check::Integer.passes("2020.5"));
    assert!(!Check::Positive.passes("0"));
    assert!(!Check::Positive.passes("-1"));
    assert!(Check::AtLeast(1900.0).passes("1900"));
    assert!(!Check::AtMost(10.0).passes("10.01"));
  }

  #[test]
  fn phone_pattern_and_digit_count() {
    assert!(Check::Phone.passes("+1 (555) 123-4567"));
    assert!(!Check::Phone.passes("555-CALL-NOW"));
    assert!(Check::MinDigits(10).passes("(555) 123-4567"));
    assert!(!Check::MinDigits(10).passes("123"));
    // Formatting characters do not count toward the minimum.
    assert!(!Check::MinDigits(10).passes("555 -- 12 -- 34"));
  }

  #[test]
  fn email_check() {
    assert!(Check::Email.passes("dana@example.com"));
    assert!(!Check::Email.passes("bad"));
    assert!(!Check::Email.passes("dana@"));
  }

  #[test]
  fn url_check_requires_scheme_and_host() {
    assert!(Check::Url.passes("https://cdn.example.com/car.jpg"));
    assert!(Check::Url.passes("ftp://files.example.com/a.png"));
    assert!(!Check::Url.passes("cdn.example.com/car.jpg"));
    assert!(!Check::Url.passes("mailto:dana@example.com"));
    assert!(!Check::Url.passes("javascript:alert(1)"));
  }

  #[test]
  fn one_of_is_exact() {
    let roles = Check::OneOf(&["buyer", "admin"]);
    assert!(roles.passes("admin"));
    assert!(!roles.passes("Admin"));
  }
}
