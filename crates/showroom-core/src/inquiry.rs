//! Contact inquiries submitted by buyers.
//!
//! Inquiries are immutable once created: the provider supports list, get,
//! create and delete, never update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::vehicle::{RecordId, Vehicle, null_as_empty};

/// The vehicle summary some providers embed in an inquiry listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarSummary {
  pub year:  i32,
  #[serde(default, deserialize_with = "null_as_empty")]
  pub make:  String,
  #[serde(default, deserialize_with = "null_as_empty")]
  pub model: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inquiry {
  pub id:         RecordId,
  pub name:       String,
  pub email:      String,
  pub phone:      String,
  pub message:    String,
  #[serde(default)]
  pub car_id:     Option<RecordId>,
  #[serde(default)]
  pub subject:    Option<String>,
  pub created_at: DateTime<Utc>,
  #[serde(default)]
  pub car:        Option<CarSummary>,
}

impl Inquiry {
  /// What the inquiry is about, for the admin listing.
  pub fn vehicle_label(&self) -> String {
    match &self.car {
      Some(car) => format!("{} {} {}", car.year, car.make, car.model),
      None => "General inquiry".to_owned(),
    }
  }
}

/// Body of an inquiry create request. `created_at` is stamped by the client
/// at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInquiry {
  pub name:       String,
  pub email:      String,
  pub phone:      String,
  pub message:    String,
  pub car_id:     Option<RecordId>,
  pub subject:    Option<String>,
  pub created_at: DateTime<Utc>,
}

/// `"Inquiry about 2020 Toyota Camry"`.
pub fn subject_for(vehicle: &Vehicle) -> String {
  format!("Inquiry about {}", vehicle.title())
}

/// The message an inquiry form starts with for `vehicle`.
pub fn default_message(vehicle: &Vehicle) -> String {
  format!(
    "Hi, I'm interested in the {} listed for {}. Could you please provide \
     more information?",
    vehicle.title(),
    vehicle.display_price()
  )
}
