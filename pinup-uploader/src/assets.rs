//! Asset discovery.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;

use pinup_core::error::{PinupError, Result};

/// Lists the files directly inside `dir`, sorted by name.
///
/// Directories (including symlinks to directories) are skipped; the scan
/// does not recurse.
pub async fn scan_assets(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir).await?;
    let mut assets = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if fs::metadata(&path).await?.is_dir() {
            debug!(path = %path.display(), "Skipping directory");
            continue;
        }
        assets.push(path);
    }

    assets.sort();
    Ok(assets)
}

/// Name an asset is pinned under: its file name.
pub fn asset_name(path: &Path) -> Result<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            PinupError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("asset path has no file name: {}", path.display()),
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_scan_skips_directories_and_sorts() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("b.png"), b"b").unwrap();
        std::fs::write(dir.path().join("a.png"), b"a").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested").join("c.png"), b"c").unwrap();

        let assets = scan_assets(dir.path()).await.unwrap();
        let names: Vec<String> = assets.iter().map(|p| asset_name(p).unwrap()).collect();

        assert_eq!(names, vec!["a.png", "b.png"]);
    }

    #[tokio::test]
    async fn test_scan_empty_directory() {
        let dir = tempdir().unwrap();
        assert!(scan_assets(dir.path()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_scan_missing_directory() {
        let dir = tempdir().unwrap();
        let err = scan_assets(&dir.path().join("missing")).await.unwrap_err();
        assert!(matches!(err, PinupError::Io(_)));
    }

    #[test]
    fn test_asset_name() {
        assert_eq!(asset_name(Path::new("./assets/cat.png")).unwrap(), "cat.png");
        assert!(asset_name(Path::new("/")).is_err());
    }
}
