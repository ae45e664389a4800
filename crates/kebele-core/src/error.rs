//! Error types for `kebele-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("resident not found: {0}")]
  ResidentNotFound(u64),

  #[error("unknown certificate type: {0:?}")]
  UnknownCertificateType(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
