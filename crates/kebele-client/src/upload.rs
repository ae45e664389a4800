//! Client-side attachment checks, applied before any bytes leave the
//! machine.
//!
//! The ceilings are advisory (the backend re-validates), but rejecting
//! locally gives the user an immediate, specific message instead of a
//! round-trip failure.

use std::path::Path;

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
  /// Resident profile photo: images only.
  Photo,
  /// Scan of an identity document: images or PDF.
  IdentityScan,
  /// Other supporting paperwork: images or PDF.
  Supporting,
}

impl AttachmentKind {
  pub fn max_bytes(self) -> u64 {
    match self {
      Self::Photo => 2 * 1024 * 1024,
      Self::IdentityScan => 5 * 1024 * 1024,
      Self::Supporting => 10 * 1024 * 1024,
    }
  }

  fn allowed_extensions(self) -> &'static [&'static str] {
    match self {
      Self::Photo => &["jpg", "jpeg", "png", "gif", "webp"],
      Self::IdentityScan | Self::Supporting => &["jpg", "jpeg", "png", "gif", "webp", "pdf"],
    }
  }

  fn label(self) -> &'static str {
    match self {
      Self::Photo => "photo",
      Self::IdentityScan => "identity document",
      Self::Supporting => "supporting document",
    }
  }
}

/// Media type for the multipart part, from the file extension.
pub fn mime_for(path: &Path) -> &'static str {
  match extension(path).as_deref() {
    Some("jpg") | Some("jpeg") => "image/jpeg",
    Some("png") => "image/png",
    Some("gif") => "image/gif",
    Some("webp") => "image/webp",
    Some("pdf") => "application/pdf",
    _ => "application/octet-stream",
  }
}

fn extension(path: &Path) -> Option<String> {
  path.extension().map(|e| e.to_string_lossy().to_lowercase())
}

/// Reject unsupported types and oversized files before submission.
pub fn check_attachment(kind: AttachmentKind, path: &Path, size_bytes: u64) -> Result<()> {
  let ext = extension(path).unwrap_or_default();
  if !kind.allowed_extensions().contains(&ext.as_str()) {
    return Err(Error::Attachment(format!(
      "{} {} has unsupported type {:?}; allowed: {}",
      kind.label(),
      path.display(),
      ext,
      kind.allowed_extensions().join(", ")
    )));
  }
  if size_bytes > kind.max_bytes() {
    return Err(Error::Attachment(format!(
      "{} {} is {} bytes; the limit is {} MB",
      kind.label(),
      path.display(),
      size_bytes,
      kind.max_bytes() / (1024 * 1024)
    )));
  }
  Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;
  use std::path::PathBuf;

  #[test]
  fn photo_accepts_images_only() {
    let jpg = PathBuf::from("photo.JPG");
    assert!(check_attachment(AttachmentKind::Photo, &jpg, 1024).is_ok());

    let pdf = PathBuf::from("photo.pdf");
    assert!(matches!(
      check_attachment(AttachmentKind::Photo, &pdf, 1024),
      Err(Error::Attachment(_))
    ));
  }

  #[test]
  fn identity_scan_accepts_pdf() {
    let pdf = PathBuf::from("id.pdf");
    assert!(check_attachment(AttachmentKind::IdentityScan, &pdf, 1024).is_ok());
  }

  #[test]
  fn size_ceiling_is_per_kind() {
    let jpg = PathBuf::from("a.jpg");
    let three_mb = 3 * 1024 * 1024;
    assert!(check_attachment(AttachmentKind::Photo, &jpg, three_mb).is_err());
    assert!(check_attachment(AttachmentKind::IdentityScan, &jpg, three_mb).is_ok());
  }

  #[test]
  fn missing_extension_is_rejected() {
    let bare = PathBuf::from("photo");
    assert!(check_attachment(AttachmentKind::Photo, &bare, 10).is_err());
  }

  #[test]
  fn mime_lookup() {
    assert_eq!(mime_for(Path::new("a.jpeg")), "image/jpeg");
    assert_eq!(mime_for(Path::new("a.PDF")), "application/pdf");
    assert_eq!(mime_for(Path::new("mystery.bin")), "application/octet-stream");
  }
}
