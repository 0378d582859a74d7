//! Error types for `showroom-core`.

use thiserror::Error;

use crate::validate::Validation;

#[derive(Debug, Error)]
pub enum Error {
  /// A form was converted into a payload without passing its rule set.
  #[error("{entity} failed validation: {validation}")]
  Invalid {
    entity:     &'static str,
    validation: Validation,
  },

  #[error("unknown {kind}: {value:?}")]
  UnknownValue { kind: &'static str, value: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
