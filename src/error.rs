// Error types for issues-rss.
// Covers upstream fetch failures, payload parsing, cache storage and feed rendering.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("GitHub request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unable to fetch issues for {repo} ({status}). Is the repo valid?")]
    AuthOrNotFound { repo: String, status: StatusCode },

    #[error("Malformed issue payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    #[error("Cache read failed: {0}")]
    StorageRead(#[source] std::io::Error),

    #[error("Cache write failed: {0}")]
    StorageWrite(#[source] std::io::Error),

    #[error("GITHUB_TOKEN is not a valid header value")]
    InvalidToken,

    #[error("Invalid repository '{0}': expected org/repo")]
    InvalidRepo(String),

    #[error("Feed rendering failed: {0}")]
    Render(#[from] rss::Error),
}

impl FeedError {
    /// Whether this error means the cache entry simply does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FeedError::StorageRead(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

pub type Result<T> = std::result::Result<T, FeedError>;
