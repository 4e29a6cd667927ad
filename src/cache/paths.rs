// Cache path utilities.
// Constructs filesystem paths for per-repository cache entries.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::github::RepoKey;

/// File name of a repository's cached issue payload.
pub const ISSUES_FILE: &str = "issues.json";

/// Get the platform cache directory (~/.cache/issues-rss on Linux).
pub fn default_cache_dir() -> PathBuf {
    ProjectDirs::from("", "", "issues-rss")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| std::env::temp_dir().join("issues-rss-cache"))
}

/// Path to a repository's directory.
pub fn repo_dir(root: &Path, repo: &RepoKey) -> PathBuf {
    root.join(sanitize_name(&repo.org))
        .join(sanitize_name(&repo.name))
}

/// Path to a repository's cached issue payload.
pub fn issues_path(root: &Path, repo: &RepoKey) -> PathBuf {
    repo_dir(root, repo).join(ISSUES_FILE)
}

/// Sanitize a name for use in filesystem paths.
/// Replaces problematic characters with underscores.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}
