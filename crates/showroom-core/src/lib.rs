//! Core types for the Showroom dealership client.
//!
//! No HTTP or terminal dependencies live here. The crate owns the record
//! types, the inventory query engine, the form validation contracts and the
//! [`provider::DealershipProvider`] trait that the HTTP client implements.

pub mod display;
pub mod error;
pub mod generation;
pub mod inquiry;
pub mod provider;
pub mod query;
pub mod session;
pub mod showroom;
pub mod validate;
pub mod vehicle;

pub use error::{Error, Result};
