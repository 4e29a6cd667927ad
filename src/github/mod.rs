// GitHub API module.
// Provides the client, the issue types and the source seam used by the feed pipeline.

pub mod client;
pub mod endpoints;
pub mod types;

use async_trait::async_trait;

use crate::error::Result;

pub use client::{GITHUB_API_BASE, GitHubClient, TOKEN_ENV};
pub use types::*;

/// Anything that can produce the raw issue payload for a repository.
#[async_trait]
pub trait IssueSource: Send + Sync {
    /// Fetch all issues and pull requests, any state, as raw JSON bytes.
    async fn fetch(&self, repo: &RepoKey) -> Result<Vec<u8>>;
}
