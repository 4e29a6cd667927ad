// Cache store for reading and writing raw issue payloads.
// Handles freshness checks from file mtime and atomic filesystem writes.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tempfile::NamedTempFile;

use crate::error::{FeedError, Result};
use crate::github::RepoKey;

use super::paths;

/// Default freshness window: 12 hours.
pub const DEFAULT_TTL: Duration = Duration::from_secs(12 * 60 * 60);

/// Whether an entry of the given age is too old to serve.
pub fn is_stale(elapsed: Duration, max_age: Duration) -> bool {
    elapsed >= max_age
}

/// On-disk cache of raw issue payloads, one file per repository.
#[derive(Debug, Clone)]
pub struct CacheStore {
    root: PathBuf,
}

impl CacheStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Location of a repository's entry.
    pub fn entry_path(&self, repo: &RepoKey) -> PathBuf {
        paths::issues_path(&self.root, repo)
    }

    /// Read a repository's payload if it is younger than `max_age`.
    ///
    /// A missing entry is a `StorageRead` error with kind NotFound; a stale
    /// entry is `Ok(None)`. Callers treat both as a miss.
    pub fn load(&self, repo: &RepoKey, max_age: Duration) -> Result<Option<Vec<u8>>> {
        let path = self.entry_path(repo);
        let modified = fs::metadata(&path)
            .and_then(|meta| meta.modified())
            .map_err(FeedError::StorageRead)?;

        // A clock set backwards makes the entry look brand new.
        let elapsed = SystemTime::now()
            .duration_since(modified)
            .unwrap_or(Duration::ZERO);
        if is_stale(elapsed, max_age) {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(FeedError::StorageRead)?;
        Ok(Some(bytes))
    }

    /// Write a repository's payload, replacing any previous entry.
    pub fn save(&self, repo: &RepoKey, bytes: &[u8]) -> Result<()> {
        write_atomic(&self.entry_path(repo), bytes).map_err(FeedError::StorageWrite)
    }
}

/// Write via a temp file in the same directory, then rename over the target.
fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;

    let mut file = NamedTempFile::new_in(parent)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;

    Ok(())
}
