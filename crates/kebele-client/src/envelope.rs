//! The response-envelope boundary.
//!
//! Every JSON endpoint answers `{ "success": bool, ...payload }` on the
//! happy path and `{ "success": false, "error": "..." }` (or a bare
//! `{ "error": "..." }` with a non-2xx status) on failure. Nothing
//! loosely-shaped crosses this module: the status header is parsed first,
//! so `success != true` surfaces the server's message verbatim even when
//! the HTTP status is 200, and the typed payload is only deserialised on
//! the success branch — a failure body never has to satisfy the payload's
//! shape.

use serde::{Deserialize, de::DeserializeOwned};

use crate::{Error, Result};

/// Status header present on every JSON response.
#[derive(Debug, Deserialize)]
struct Header {
  #[serde(default)]
  success: bool,
  error:   Option<String>,
}

/// Enforce the contract: the payload is only trusted under `success: true`.
pub fn decode<T: DeserializeOwned>(body: &str, what: &str) -> Result<T> {
  let decode_err = |source: serde_json::Error| Error::Decode { what: what.to_string(), source };

  let header: Header = serde_json::from_str(body).map_err(decode_err)?;
  if !header.success {
    return Err(Error::Backend(
      header
        .error
        .unwrap_or_else(|| format!("{what}: backend reported failure")),
    ));
  }
  serde_json::from_str(body).map_err(decode_err)
}

/// Error-only body sometimes sent with non-2xx statuses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
  pub error: Option<String>,
}

/// Payload for endpoints that acknowledge without returning data.
#[derive(Debug, Deserialize)]
pub struct Ack {}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Debug, Deserialize)]
  struct Names {
    names: Vec<String>,
  }

  #[test]
  fn success_with_payload_decodes() {
    let names: Names =
      decode(r#"{"success": true, "names": ["Abdi"]}"#, "listing names").unwrap();
    assert_eq!(names.names, vec!["Abdi"]);
  }

  #[test]
  fn success_false_is_a_failure_even_with_a_payload() {
    let result: Result<Names> = decode(
      r#"{"success": false, "error": "registry offline", "names": ["Abdi"]}"#,
      "listing names",
    );
    match result {
      Err(Error::Backend(msg)) => assert_eq!(msg, "registry offline"),
      other => panic!("expected backend error, got {other:?}"),
    }
  }

  #[test]
  fn failure_body_without_the_payload_fields_still_surfaces_the_message() {
    // A failure body carries no payload at all; the server's message must
    // come through, not a shape error about missing fields.
    let result: Result<Names> =
      decode(r#"{"success": false, "error": "registry offline"}"#, "listing names");
    match result {
      Err(Error::Backend(msg)) => assert_eq!(msg, "registry offline"),
      other => panic!("expected backend error, got {other:?}"),
    }
  }

  #[test]
  fn missing_success_field_counts_as_failure() {
    let result: Result<Names> = decode(r#"{"names": []}"#, "listing names");
    assert!(matches!(result, Err(Error::Backend(_))));
  }

  #[test]
  fn success_with_a_malformed_payload_is_a_decode_error() {
    let result: Result<Names> = decode(r#"{"success": true}"#, "listing names");
    assert!(matches!(result, Err(Error::Decode { .. })));
  }

  #[test]
  fn ack_decodes_from_a_bare_success() {
    assert!(decode::<Ack>(r#"{"success": true}"#, "toggling status").is_ok());
  }
}
