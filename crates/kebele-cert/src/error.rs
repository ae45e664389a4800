//! Error types for `kebele-cert`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("resident record has no identifier; it must be saved before a certificate is generated")]
  MissingResidentId,

  #[error("resident identifier is not numeric: {0:?}")]
  InvalidResidentId(String),

  #[error("certificate renderer is not ready: {0}")]
  EngineUnavailable(String),

  #[error("pdf backend error: {0}")]
  Backend(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
