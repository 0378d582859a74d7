//! Form validation contracts.
//!
//! Each form holds raw UI text and declares one ordered rule chain per
//! field. Validation evaluates every field (never fail-fast) and keeps the
//! message of the first rule that fails in each chain. Blank or
//! whitespace-only text counts as absent: a required field reports its
//! required message, an optional one skips its chain.

mod forms;
mod rules;

use std::{borrow::Cow, collections::BTreeMap, fmt};

use chrono::{Datelike, Utc};
use serde::Serialize;

pub use self::{
  forms::{CarForm, CredentialForm, InquiryForm, ShowroomForm},
  rules::{Check, Rule, parse_number},
};

// ─── Validation ──────────────────────────────────────────────────────────────

/// Field-level outcome of validating a form. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Validation {
  errors: BTreeMap<&'static str, String>,
}

impl Validation {
  /// Run every chain in `rules` against the value `lookup` returns for its
  /// field.
  pub fn collect<'a>(
    rules: &[FieldRules],
    lookup: impl Fn(&'static str) -> &'a str,
  ) -> Self {
    let errors = rules
      .iter()
      .filter_map(|chain| {
        chain
          .first_violation(lookup(chain.field))
          .map(|msg| (chain.field, msg.to_owned()))
      })
      .collect();
    Self { errors }
  }

  pub fn is_valid(&self) -> bool { self.errors.is_empty() }

  pub fn errors(&self) -> &BTreeMap<&'static str, String> { &self.errors }

  pub fn error(&self, field: &str) -> Option<&str> {
    self.errors.get(field).map(String::as_str)
  }

  /// Turn an invalid result into [`crate::Error::Invalid`].
  pub fn into_result(self, entity: &'static str) -> crate::Result<()> {
    if self.is_valid() {
      Ok(())
    } else {
      Err(crate::Error::Invalid {
        entity,
        validation: self,
      })
    }
  }
}

impl fmt::Display for Validation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.errors.is_empty() {
      return f.write_str("no errors");
    }
    for (i, (field, message)) in self.errors.iter().enumerate() {
      if i > 0 {
        f.write_str("; ")?;
      }
      write!(f, "{field}: {message}")?;
    }
    Ok(())
  }
}

// ─── FieldRules ──────────────────────────────────────────────────────────────

/// The ordered rule chain for one field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRules {
  pub field: &'static str,
  required:  Option<Cow<'static, str>>,
  rules:     Vec<Rule>,
}

impl FieldRules {
  /// A field that must be non-blank; `message` is reported when it is blank.
  pub fn required(
    field: &'static str,
    message: impl Into<Cow<'static, str>>,
  ) -> Self {
    Self {
      field,
      required: Some(message.into()),
      rules: Vec::new(),
    }
  }

  /// A field whose chain only runs when it has a value.
  pub fn optional(field: &'static str) -> Self {
    Self {
      field,
      required: None,
      rules: Vec::new(),
    }
  }

  pub fn rule(
    mut self,
    check: Check,
    message: impl Into<Cow<'static, str>>,
  ) -> Self {
    self.rules.push(Rule::new(check, message));
    self
  }

  pub fn min_chars(self, n: usize, message: &'static str) -> Self {
    self.rule(Check::MinChars(n), message)
  }

  pub fn max_chars(self, n: usize, message: &'static str) -> Self {
    self.rule(Check::MaxChars(n), message)
  }

  pub fn number(self, message: &'static str) -> Self {
    self.rule(Check::Number, message)
  }

  pub fn integer(self, message: &'static str) -> Self {
    self.rule(Check::Integer, message)
  }

  pub fn positive(self, message: &'static str) -> Self {
    self.rule(Check::Positive, message)
  }

  pub fn at_least(
    self,
    min: f64,
    message: impl Into<Cow<'static, str>>,
  ) -> Self {
    self.rule(Check::AtLeast(min), message)
  }

  pub fn at_most(self, max: f64, message: impl Into<Cow<'static, str>>) -> Self {
    self.rule(Check::AtMost(max), message)
  }

  pub fn phone(self, pattern_message: &'static str, digits: usize) -> Self {
    self.rule(Check::Phone, pattern_message).rule(
      Check::MinDigits(digits),
      format!("Phone number must be at least {digits} digits"),
    )
  }

  pub fn email(self, message: &'static str) -> Self {
    self.rule(Check::Email, message)
  }

  pub fn url(self, message: &'static str) -> Self {
    self.rule(Check::Url, message)
  }

  pub fn is_required(&self) -> bool { self.required.is_some() }

  /// The message of the first failing rule, if any.
  pub fn first_violation(&self, raw: &str) -> Option<&str> {
    let value = raw.trim();
    if value.is_empty() {
      return self.required.as_deref();
    }
    self
      .rules
      .iter()
      .find(|rule| !rule.check.passes(value))
      .map(|rule| rule.message.as_ref())
  }
}

// ─── Form ────────────────────────────────────────────────────────────────────

/// An editable field: the key used in [`Validation`] plus its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
  pub name:  &'static str,
  pub label: &'static str,
}

impl Field {
  pub const fn new(name: &'static str, label: &'static str) -> Self {
    Self { name, label }
  }
}

/// A form of raw text fields with a validation contract.
pub trait Form {
  /// Entity name used in [`crate::Error::Invalid`].
  const ENTITY: &'static str;

  /// Editable fields in display order. May depend on the form's mode.
  fn fields(&self) -> &'static [Field];

  /// Rule chains, given the year used for "not in the future" bounds.
  fn rules(&self, current_year: i32) -> Vec<FieldRules>;

  /// Current text of `field`; unknown names read as empty.
  fn value(&self, field: &str) -> &str;

  fn value_mut(&mut self, field: &str) -> Option<&mut String>;

  fn validate_for_year(&self, current_year: i32) -> Validation {
    Validation::collect(&self.rules(current_year), |field| self.value(field))
  }

  fn validate(&self) -> Validation { self.validate_for_year(current_year()) }
}

/// The current calendar year in UTC.
pub fn current_year() -> i32 { Utc::now().year() }

/// Trimmed text, or `None` when blank.
pub(crate) fn present(raw: &str) -> Option<String> {
  let value = raw.trim();
  (!value.is_empty()).then(|| value.to_owned())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn chain() -> FieldRules {
    FieldRules::required("name", "Name is required")
      .min_chars(2, "Name must be at least 2 characters")
      .max_chars(5, "Name must be at most 5 characters")
  }

  #[test]
  fn blank_required_reports_required_message() {
    assert_eq!(chain().first_violation("   "), Some("Name is required"));
  }

  #[test]
  fn first_failing_rule_wins() {
    let chain = FieldRules::required("n", "req")
      .number("not a number")
      .positive("not positive");
    assert_eq!(chain.first_violation("abc"), Some("not a number"));
    assert_eq!(chain.first_violation("-3"), Some("not positive"));
    assert_eq!(chain.first_violation("3"), None);
  }

  #[test]
  fn values_are_trimmed_before_checks() {
    assert_eq!(chain().first_violation("  ab  "), None);
  }

  #[test]
  fn optional_blank_skips_chain() {
    let chain = FieldRules::optional("url").url("bad url");
    assert_eq!(chain.first_violation(""), None);
    assert_eq!(chain.first_violation("nope"), Some("bad url"));
  }

  #[test]
  fn collect_reports_every_field() {
    let rules = vec![
      chain(),
      FieldRules::required("email", "Email is required").email("bad email"),
    ];
    let v = Validation::collect(&rules, |field| match field {
      "name" => "x",
      _ => "nope",
    });
    assert!(!v.is_valid());
    assert_eq!(v.errors().len(), 2);
    assert_eq!(v.error("email"), Some("bad email"));
    assert_eq!(
      v.to_string(),
      "email: bad email; name: Name must be at least 2 characters"
    );
  }

  #[test]
  fn into_result_wraps_errors() {
    assert!(Validation::default().into_result("car").is_ok());
    let v = Validation::collect(&[chain()], |_| "");
    assert!(matches!(
      v.into_result("car"),
      Err(crate::Error::Invalid { entity: "car", .. })
    ));
  }
}
