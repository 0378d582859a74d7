//! Display helpers shared by every screen.

/// Shown wherever an optional attribute is absent.
pub const PLACEHOLDER: &str = "N/A";

/// Returns `value`, or [`PLACEHOLDER`] when it is absent or blank.
pub fn or_placeholder(value: Option<&str>) -> &str {
  match value {
    Some(v) if !v.trim().is_empty() => v,
    _ => PLACEHOLDER,
  }
}

/// US-dollar formatting: `$20,000` for whole amounts, `$15,000.50` otherwise.
pub fn format_price(price: f64) -> String {
  if !price.is_finite() {
    return PLACEHOLDER.to_owned();
  }
  let cents = (price.abs() * 100.0).round() as u64;
  let sign = if price < 0.0 { "-" } else { "" };
  let whole = group_thousands(cents / 100);
  match cents % 100 {
    0 => format!("{sign}${whole}"),
    frac => format!("{sign}${whole}.{frac:02}"),
  }
}

/// `12,345 mi`, or the placeholder when mileage is unknown.
pub fn format_mileage(mileage: Option<u32>) -> String {
  match mileage {
    Some(m) => format!("{} mi", group_thousands(u64::from(m))),
    None => PLACEHOLDER.to_owned(),
  }
}

/// Cut `text` to `max` characters, appending `...` when anything was removed.
pub fn preview(text: &str, max: usize) -> String {
  if text.chars().count() <= max {
    return text.to_owned();
  }
  let mut out: String = text.chars().take(max).collect();
  out.push_str("...");
  out
}

fn group_thousands(n: u64) -> String {
  let digits = n.to_string();
  let mut out = String::with_capacity(digits.len() + digits.len() / 3);
  for (i, c) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      out.push(',');
    }
    out.push(c);
  }
  out
}
