//! Error taxonomy for the backend client.
//!
//! Four failure families, kept distinct so the UI can phrase them
//! differently: transport (nothing came back), backend-reported (the
//! server's own message, surfaced verbatim), bare HTTP status (non-2xx with
//! no usable body), and decode (2xx but an unrecognisable shape).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("could not reach the registry backend: {0}")]
  Transport(#[from] reqwest::Error),

  /// The server said no. The message is the server's, verbatim.
  #[error("{0}")]
  Backend(String),

  #[error("{what} failed with HTTP {status}")]
  Status { what: String, status: u16 },

  #[error("{what}: unexpected response shape: {source}")]
  Decode {
    what:   String,
    #[source]
    source: serde_json::Error,
  },

  #[error("attachment rejected: {0}")]
  Attachment(String),

  #[error("reading attachment {path}: {source}")]
  AttachmentIo {
    path:   String,
    #[source]
    source: std::io::Error,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
