//! Error type for `showroom-client`.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("request failed: {0}")]
  Http(#[from] reqwest::Error),

  /// The provider answered with a non-success status.
  #[error("provider returned {status}: {body}")]
  Status { status: StatusCode, body: String },

  #[error("could not decode provider response: {0}")]
  Decode(#[from] serde_json::Error),

  #[error("invalid base URL: {0}")]
  Url(#[from] url::ParseError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
