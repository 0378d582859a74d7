//! Inventory query engine.
//!
//! [`query_inventory`] derives the ordered view shown on the inventory screen
//! from the full record list. Every active predicate must hold (logical AND);
//! absent parameters are no-ops. Filtering always runs before the sort, and
//! the sort is stable so records with equal keys keep their source order. The
//! input slice is never mutated.
//!
//! The UI re-runs the whole pipeline on every keystroke; no index is kept.

use std::{cmp::Ordering, str::FromStr};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::vehicle::Vehicle;

// ─── Sort ────────────────────────────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SortKey {
  #[default]
  YearDesc,
  YearAsc,
  PriceDesc,
  PriceAsc,
  MileageAsc,
  MileageDesc,
}

impl SortKey {
  /// Parse UI text, falling back to the default order for anything unknown.
  pub fn parse_lenient(text: &str) -> Self {
    Self::from_str(text.trim()).unwrap_or_default()
  }

  pub fn label(self) -> &'static str {
    match self {
      Self::YearDesc => "Newest first",
      Self::YearAsc => "Oldest first",
      Self::PriceDesc => "Price: high to low",
      Self::PriceAsc => "Price: low to high",
      Self::MileageAsc => "Mileage: low to high",
      Self::MileageDesc => "Mileage: high to low",
    }
  }

  /// The next key in selector order, wrapping around.
  pub fn next(self) -> Self {
    let all: Vec<_> = Self::iter().collect();
    let at = all.iter().position(|k| *k == self).unwrap_or(0);
    all[(at + 1) % all.len()]
  }

  fn compare(self, a: &Vehicle, b: &Vehicle) -> Ordering {
    // Unknown mileage sorts as zero.
    let miles = |v: &Vehicle| v.mileage.unwrap_or(0);
    match self {
      Self::YearDesc => b.year.cmp(&a.year),
      Self::YearAsc => a.year.cmp(&b.year),
      Self::PriceDesc => b.price.total_cmp(&a.price),
      Self::PriceAsc => a.price.total_cmp(&b.price),
      Self::MileageAsc => miles(a).cmp(&miles(b)),
      Self::MileageDesc => miles(b).cmp(&miles(a)),
    }
  }
}

// ─── Restriction ─────────────────────────────────────────────────────────────

/// Exact-match restriction to one discrete value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "by", content = "value", rename_all = "snake_case")]
pub enum Restriction {
  #[default]
  All,
  Make(String),
  BodyType(String),
}

impl Restriction {
  /// `""` and `"all"` (any case) mean no restriction.
  pub fn make(value: &str) -> Self {
    if is_all(value) {
      Self::All
    } else {
      Self::Make(value.to_owned())
    }
  }

  pub fn body_type(value: &str) -> Self {
    if is_all(value) {
      Self::All
    } else {
      Self::BodyType(value.to_owned())
    }
  }

  pub fn label(&self) -> String {
    match self {
      Self::All => "All".to_owned(),
      Self::Make(m) => format!("Make: {m}"),
      Self::BodyType(t) => format!("Type: {t}"),
    }
  }

  fn admits(&self, v: &Vehicle) -> bool {
    match self {
      Self::All => true,
      Self::Make(make) => v.make == *make,
      Self::BodyType(body) => v.body_type.as_deref() == Some(body.as_str()),
    }
  }
}

fn is_all(value: &str) -> bool {
  let value = value.trim();
  value.is_empty() || value.eq_ignore_ascii_case("all")
}

// ─── Query ───────────────────────────────────────────────────────────────────

/// Typed query parameters. `None` bounds are unbounded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryQuery {
  /// Case-insensitive substring matched against make, model, color and year.
  pub search:      Option<String>,
  #[serde(default)]
  pub restriction: Restriction,
  pub min_year:    Option<i32>,
  pub max_year:    Option<i32>,
  pub min_price:   Option<f64>,
  pub max_price:   Option<f64>,
  #[serde(default)]
  pub sort:        SortKey,
}

/// Raw filter state as typed into the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryInputs {
  pub search:      String,
  pub restriction: Restriction,
  pub min_year:    String,
  pub max_year:    String,
  pub min_price:   String,
  pub max_price:   String,
  pub sort:        SortKey,
}

impl QueryInputs {
  /// True when no filter would exclude anything.
  pub fn is_unfiltered(&self) -> bool {
    InventoryQuery::from_inputs(self).has_no_filters()
  }
}

impl InventoryQuery {
  /// Build a query from half-typed input. Text that is not a finite number
  /// leaves that bound unset instead of failing.
  pub fn from_inputs(inputs: &QueryInputs) -> Self {
    Self {
      search:      (!inputs.search.is_empty()).then(|| inputs.search.clone()),
      restriction: inputs.restriction.clone(),
      min_year:    parse_year_bound(&inputs.min_year),
      max_year:    parse_year_bound(&inputs.max_year),
      min_price:   parse_bound(&inputs.min_price),
      max_price:   parse_bound(&inputs.max_price),
      sort:        inputs.sort,
    }
  }

  pub fn has_no_filters(&self) -> bool {
    self.search.as_deref().is_none_or(str::is_empty)
      && self.restriction == Restriction::All
      && self.min_year.is_none()
      && self.max_year.is_none()
      && self.min_price.is_none()
      && self.max_price.is_none()
  }

  fn admits(&self, v: &Vehicle, needle: Option<&str>) -> bool {
    needle.is_none_or(|n| matches_search(v, n))
      && self.restriction.admits(v)
      && self.min_year.is_none_or(|min| v.year >= min)
      && self.max_year.is_none_or(|max| v.year <= max)
      && self.min_price.is_none_or(|min| v.price >= min)
      && self.max_price.is_none_or(|max| v.price <= max)
  }
}

/// Lenient numeric parse for filter text: blank, non-numeric and non-finite
/// input all mean "no bound".
pub fn parse_bound(text: &str) -> Option<f64> {
  let text = text.trim();
  if text.is_empty() {
    return None;
  }
  text.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Year bounds accept decimal text and truncate it toward zero.
fn parse_year_bound(text: &str) -> Option<i32> {
  let value = parse_bound(text)?.trunc();
  (value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX))
    .then_some(value as i32)
}

/// `needle` must already be lowercase.
fn matches_search(v: &Vehicle, needle: &str) -> bool {
  v.make.to_lowercase().contains(needle)
    || v.model.to_lowercase().contains(needle)
    || v
      .color
      .as_deref()
      .is_some_and(|c| c.to_lowercase().contains(needle))
    || v.year.to_string().contains(needle)
}

// ─── Engine ──────────────────────────────────────────────────────────────────

/// Filter `records` by every active predicate in `query`, then stable-sort by
/// `query.sort`.
pub fn query_inventory<'a>(
  records: &'a [Vehicle],
  query: &InventoryQuery,
) -> Vec<&'a Vehicle> {
  let needle = query
    .search
    .as_deref()
    .filter(|s| !s.is_empty())
    .map(str::to_lowercase);

  let mut view: Vec<&Vehicle> = records
    .iter()
    .filter(|v| query.admits(v, needle.as_deref()))
    .collect();
  view.sort_by(|a, b| query.sort.compare(a, b));
  view
}

/// The derived view plus the size of the list it came from.
#[derive(Debug, Clone)]
pub struct InventoryView<'a> {
  pub vehicles: Vec<&'a Vehicle>,
  pub total:    usize,
}

impl<'a> InventoryView<'a> {
  pub fn new(records: &'a [Vehicle], query: &InventoryQuery) -> Self {
    Self {
      vehicles: query_inventory(records, query),
      total:    records.len(),
    }
  }

  pub fn shown(&self) -> usize { self.vehicles.len() }

  pub fn summary(&self) -> String {
    format!("Showing {} of {} vehicles", self.shown(), self.total)
  }
}

// ─── Selector values ─────────────────────────────────────────────────────────

/// Distinct non-empty makes in first-seen order.
pub fn distinct_makes(records: &[Vehicle]) -> Vec<String> {
  distinct(records.iter().map(|v| v.make.as_str()))
}

/// Distinct body types in first-seen order; vehicles without one are skipped.
pub fn distinct_body_types(records: &[Vehicle]) -> Vec<String> {
  distinct(records.iter().filter_map(|v| v.body_type.as_deref()))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
  let mut out: Vec<String> = Vec::new();
  for value in values.filter(|v| !v.trim().is_empty()) {
    if !out.iter().any(|seen| seen == value) {
      out.push(value.to_owned());
    }
  }
  out
}

/// Every restriction the selector can cycle through: `All`, each make, then
/// each body type.
pub fn restriction_options(records: &[Vehicle]) -> Vec<Restriction> {
  std::iter::once(Restriction::All)
    .chain(distinct_makes(records).into_iter().map(Restriction::Make))
    .chain(
      distinct_body_types(records)
        .into_iter()
        .map(Restriction::BodyType),
    )
    .collect()
}

/// The newest `n` vehicles for the home screen.
pub fn featured(records: &[Vehicle], n: usize) -> Vec<&Vehicle> {
  let mut newest = query_inventory(records, &InventoryQuery::default());
  newest.truncate(n);
  newest
}
