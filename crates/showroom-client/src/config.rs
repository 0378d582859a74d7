use serde::Deserialize;
use showroom_core::vehicle::RecordId;

/// Connection settings for [`crate::HttpProvider`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
  /// Root of the REST backend, e.g. `http://localhost:5001`.
  pub base_url:          String,
  pub timeout_secs:      u64,
  /// Showroom a new admin account is attached to on signup.
  pub admin_showroom_id: RecordId,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self {
      base_url:          "http://localhost:5001".to_string(),
      timeout_secs:      30,
      admin_showroom_id: 1,
    }
  }
}
