//! The `DealershipProvider` trait.
//!
//! The remote backend that stores vehicles, showrooms and inquiries and
//! checks credentials. `showroom-client` implements it over HTTP; the UI
//! depends only on this abstraction.

use std::future::Future;

use crate::{
  inquiry::{Inquiry, NewInquiry},
  session::{AuthOutcome, Credentials},
  showroom::{NewShowroom, Showroom},
  vehicle::{NewVehicle, RecordId, Vehicle},
};

/// Abstraction over the dealership data provider.
///
/// `get_*` methods return `Ok(None)` when the record does not exist. Create
/// and update return the record as the provider stored it. Inquiries have no
/// update.
///
/// All methods return `Send` futures so results can be produced on spawned
/// tokio tasks.
pub trait DealershipProvider: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Vehicles ──────────────────────────────────────────────────────────

  fn list_vehicles(
    &self,
  ) -> impl Future<Output = Result<Vec<Vehicle>, Self::Error>> + Send + '_;

  fn get_vehicle(
    &self,
    id: RecordId,
  ) -> impl Future<Output = Result<Option<Vehicle>, Self::Error>> + Send + '_;

  fn create_vehicle(
    &self,
    input: NewVehicle,
  ) -> impl Future<Output = Result<Vehicle, Self::Error>> + Send + '_;

  fn update_vehicle(
    &self,
    id: RecordId,
    input: NewVehicle,
  ) -> impl Future<Output = Result<Vehicle, Self::Error>> + Send + '_;

  fn delete_vehicle(
    &self,
    id: RecordId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Showrooms ─────────────────────────────────────────────────────────

  fn list_showrooms(
    &self,
  ) -> impl Future<Output = Result<Vec<Showroom>, Self::Error>> + Send + '_;

  fn get_showroom(
    &self,
    id: RecordId,
  ) -> impl Future<Output = Result<Option<Showroom>, Self::Error>> + Send + '_;

  fn create_showroom(
    &self,
    input: NewShowroom,
  ) -> impl Future<Output = Result<Showroom, Self::Error>> + Send + '_;

  fn update_showroom(
    &self,
    id: RecordId,
    input: NewShowroom,
  ) -> impl Future<Output = Result<Showroom, Self::Error>> + Send + '_;

  fn delete_showroom(
    &self,
    id: RecordId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Inquiries ─────────────────────────────────────────────────────────

  fn list_inquiries(
    &self,
  ) -> impl Future<Output = Result<Vec<Inquiry>, Self::Error>> + Send + '_;

  fn get_inquiry(
    &self,
    id: RecordId,
  ) -> impl Future<Output = Result<Option<Inquiry>, Self::Error>> + Send + '_;

  fn create_inquiry(
    &self,
    input: NewInquiry,
  ) -> impl Future<Output = Result<Inquiry, Self::Error>> + Send + '_;

  fn delete_inquiry(
    &self,
    id: RecordId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Auth ──────────────────────────────────────────────────────────────

  /// Check credentials. A rejection is not an error; transport failures are.
  fn login(
    &self,
    credentials: Credentials,
  ) -> impl Future<Output = Result<AuthOutcome, Self::Error>> + Send + '_;

  /// Register a new account for `credentials.role`.
  fn signup(
    &self,
    credentials: Credentials,
  ) -> impl Future<Output = Result<AuthOutcome, Self::Error>> + Send + '_;
}
