//! Writing generated documents to the downloads directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Write `bytes` under `file_name` inside `dir`, creating `dir` as needed.
/// Returns the full path of the written file.
pub fn save(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
  std::fs::create_dir_all(dir)
    .with_context(|| format!("creating downloads directory {}", dir.display()))?;
  let path = dir.join(file_name);
  std::fs::write(&path, bytes)
    .with_context(|| format!("writing {}", path.display()))?;
  Ok(path)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn save_creates_the_directory_and_file() {
    let dir = std::env::temp_dir().join(format!("kebele-dl-{}", uuid::Uuid::new_v4()));
    let path = save(&dir, "Birth_Certificate_42.pdf", b"%PDF test").unwrap();
    assert!(path.ends_with("Birth_Certificate_42.pdf"));
    assert_eq!(std::fs::read(&path).unwrap(), b"%PDF test");
    std::fs::remove_dir_all(&dir).ok();
  }
}
