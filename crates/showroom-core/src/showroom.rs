//! Showrooms and the vehicles they hold.
//!
//! A showroom owns vehicles only through [`Vehicle::showroom_id`]; nothing
//! here cascades.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::vehicle::{RecordId, Vehicle, null_as_empty};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Showroom {
  pub id:          RecordId,
  pub name:        String,
  #[serde(default, deserialize_with = "null_as_empty")]
  pub address:     String,
  #[serde(default, deserialize_with = "null_as_empty")]
  pub phone:       String,
  #[serde(default, deserialize_with = "null_as_empty")]
  pub email:       String,
  #[serde(default)]
  pub hours:       Option<String>,
  #[serde(default)]
  pub description: Option<String>,
}

/// Body of a showroom create or update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewShowroom {
  pub name:        String,
  pub address:     String,
  pub phone:       String,
  pub email:       String,
  pub hours:       Option<String>,
  pub description: Option<String>,
}

impl NewShowroom {
  pub fn into_showroom(self, id: RecordId) -> Showroom {
    Showroom {
      id,
      name: self.name,
      address: self.address,
      phone: self.phone,
      email: self.email,
      hours: self.hours,
      description: self.description,
    }
  }
}

/// Vehicles whose foreign key points at `showroom_id`, in source order.
pub fn vehicles_in_showroom(
  records: &[Vehicle],
  showroom_id: RecordId,
) -> Vec<&Vehicle> {
  records
    .iter()
    .filter(|v| v.showroom_id == Some(showroom_id))
    .collect()
}

/// Number of vehicles per showroom. Vehicles without a showroom are skipped.
pub fn showroom_counts(records: &[Vehicle]) -> BTreeMap<RecordId, usize> {
  let mut counts = BTreeMap::new();
  for id in records.iter().filter_map(|v| v.showroom_id) {
    *counts.entry(id).or_insert(0) += 1;
  }
  counts
}
