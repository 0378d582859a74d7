//! HTTP implementation of [`showroom_core::provider::DealershipProvider`].
//!
//! Talks JSON to the dealership REST backend:
//!
//! | Resource   | Paths                                |
//! |------------|--------------------------------------|
//! | vehicles   | `/cars`, `/cars/{id}`                |
//! | showrooms  | `/showrooms`, `/showrooms/{id}`      |
//! | inquiries  | `/contacts`, `/contacts/{id}`        |
//! | auth       | `/{role}/login`, `/{role}/signup`    |

mod config;
mod error;
mod http;

pub use config::ClientConfig;
pub use error::{Error, Result};
pub use http::HttpProvider;
