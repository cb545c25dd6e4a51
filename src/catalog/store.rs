//! Catalog file access
//!
//! Reads catalog files under a shared advisory lock so a writer holding the
//! exclusive lock never exposes a half-written file.

use fs2::FileExt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to read catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid catalog: expected an array of startups or an object with a `startups` array")]
    Shape,
}

/// Read a catalog file's contents while holding a shared lock
pub fn read_locked(path: &Path) -> Result<String, CatalogError> {
    let io_err = |source: std::io::Error| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CatalogError::NotFound(path.to_path_buf())
        } else {
            io_err(e)
        }
    })?;

    file.lock_shared().map_err(io_err)?;
    let mut contents = String::new();
    let read = file.read_to_string(&mut contents);
    // Unlock before surfacing a read failure
    let unlocked = file.unlock();
    read.map_err(io_err)?;
    unlocked.map_err(io_err)?;

    Ok(contents)
}

/// Default catalog location: `$YHTEYS_CATALOG`, else
/// `{data_dir}/yhteys/startups.json`
pub fn default_catalog_path() -> PathBuf {
    if let Some(path) = std::env::var_os("YHTEYS_CATALOG") {
        return PathBuf::from(path);
    }

    match dirs::data_dir() {
        Some(data_dir) => data_dir.join("yhteys").join("startups.json"),
        // Fallback to current directory
        None => PathBuf::from(".yhteys").join("startups.json"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_locked_returns_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, "[]").unwrap();
        assert_eq!(read_locked(&path).unwrap(), "[]");
    }

    #[test]
    fn test_read_locked_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read_locked(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
        assert!(err.to_string().contains("nope.json"));
    }

    #[test]
    fn test_read_locked_allows_concurrent_shared_readers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, "[1]").unwrap();

        let other = File::open(&path).unwrap();
        other.lock_shared().unwrap();
        assert_eq!(read_locked(&path).unwrap(), "[1]");
        other.unlock().unwrap();
    }

    #[test]
    fn test_default_catalog_path_file_name() {
        let path = default_catalog_path();
        assert!(path.to_string_lossy().ends_with(".json"));
    }
}
