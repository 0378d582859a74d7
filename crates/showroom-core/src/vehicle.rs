//! Vehicle records as returned by the data provider.
//!
//! Only `year` and `price` are guaranteed on the wire. Every other attribute
//! may be missing and is rendered with the placeholder from
//! [`crate::display`].

use serde::{Deserialize, Deserializer, Serialize};

use crate::display::{format_mileage, format_price, or_placeholder};

/// Provider-assigned integer identifier shared by every record type.
pub type RecordId = i64;

// ─── Vehicle ─────────────────────────────────────────────────────────────────

/// One car in the inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "VehicleRecord")]
pub struct Vehicle {
  pub id:           RecordId,
  pub make:         String,
  pub model:        String,
  pub year:         i32,
  pub price:        f64,
  pub mileage:      Option<u32>,
  pub color:        Option<String>,
  pub engine:       Option<String>,
  pub transmission: Option<String>,
  pub fuel_type:    Option<String>,
  /// Body style ("SUV", "Sedan", ...).
  pub body_type:    Option<String>,
  pub description:  Option<String>,
  pub image_url:    Option<String>,
  pub showroom_id:  Option<RecordId>,
}

/// Wire shape of a vehicle. Text columns may be missing or `null`.
///
/// Older backends send a single `name` column in place of `model` and call
/// the body style `type`.
#[derive(Deserialize)]
struct VehicleRecord {
  id:           RecordId,
  #[serde(default)]
  make:         Option<String>,
  #[serde(default)]
  model:        Option<String>,
  #[serde(default)]
  name:         Option<String>,
  year:         i32,
  price:        f64,
  #[serde(default)]
  mileage:      Option<u32>,
  #[serde(default)]
  color:        Option<String>,
  #[serde(default)]
  engine:       Option<String>,
  #[serde(default)]
  transmission: Option<String>,
  #[serde(default)]
  fuel_type:    Option<String>,
  #[serde(default, alias = "type")]
  body_type:    Option<String>,
  #[serde(default)]
  description:  Option<String>,
  #[serde(default)]
  image_url:    Option<String>,
  #[serde(default)]
  showroom_id:  Option<RecordId>,
}

impl From<VehicleRecord> for Vehicle {
  fn from(r: VehicleRecord) -> Self {
    Vehicle {
      id:           r.id,
      make:         r.make.unwrap_or_default(),
      model:        r.model.or(r.name).unwrap_or_default(),
      year:         r.year,
      price:        r.price,
      mileage:      r.mileage,
      color:        r.color,
      engine:       r.engine,
      transmission: r.transmission,
      fuel_type:    r.fuel_type,
      body_type:    r.body_type,
      description:  r.description,
      image_url:    r.image_url,
      showroom_id:  r.showroom_id,
    }
  }
}

/// Decodes a text column that may be `null` as an empty string. Pair with
/// `#[serde(default)]` so a missing key behaves the same.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Vehicle {
  /// `"2020 Toyota Camry"`, skipping whichever of make/model is empty.
  pub fn title(&self) -> String {
    [self.year.to_string(), self.make.clone(), self.model.clone()]
      .into_iter()
      .filter(|part| !part.is_empty())
      .collect::<Vec<_>>()
      .join(" ")
  }

  pub fn display_price(&self) -> String { format_price(self.price) }

  pub fn display_mileage(&self) -> String { format_mileage(self.mileage) }

  /// Label/value rows for the detail screen. Absent values degrade to the
  /// placeholder.
  pub fn spec_rows(&self) -> Vec<(&'static str, String)> {
    vec![
      ("Make", or_placeholder(Some(&self.make)).to_owned()),
      ("Model", or_placeholder(Some(&self.model)).to_owned()),
      ("Year", self.year.to_string()),
      ("Price", self.display_price()),
      ("Mileage", self.display_mileage()),
      ("Type", or_placeholder(self.body_type.as_deref()).to_owned()),
      ("Color", or_placeholder(self.color.as_deref()).to_owned()),
      ("Engine", or_placeholder(self.engine.as_deref()).to_owned()),
      (
        "Transmission",
        or_placeholder(self.transmission.as_deref()).to_owned(),
      ),
      ("Fuel", or_placeholder(self.fuel_type.as_deref()).to_owned()),
    ]
  }
}

// ─── NewVehicle ──────────────────────────────────────────────────────────────

/// Body of a create or update request. The provider assigns `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewVehicle {
  pub make:         String,
  pub model:        String,
  pub year:         i32,
  pub price:        f64,
  pub mileage:      Option<u32>,
  pub color:        Option<String>,
  pub engine:       Option<String>,
  pub transmission: Option<String>,
  pub fuel_type:    Option<String>,
  pub body_type:    Option<String>,
  pub description:  Option<String>,
  pub image_url:    Option<String>,
  pub showroom_id:  RecordId,
}

impl NewVehicle {
  /// The record the provider would echo back for this payload under `id`.
  pub fn into_vehicle(self, id: RecordId) -> Vehicle {
    Vehicle {
      id,
      make: self.make,
      model: self.model,
      year: self.year,
      price: self.price,
      mileage: self.mileage,
      color: self.color,
      engine: self.engine,
      transmission: self.transmission,
      fuel_type: self.fuel_type,
      body_type: self.body_type,
      description: self.description,
      image_url: self.image_url,
      showroom_id: Some(self.showroom_id),
    }
  }
}
