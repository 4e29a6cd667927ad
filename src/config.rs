// Runtime configuration.
// Upstream API location, cache directory and freshness window shared by CLI and server modes.

use std::path::PathBuf;
use std::time::Duration;

use crate::cache::{CacheStore, DEFAULT_TTL, default_cache_dir};
use crate::error::Result;
use crate::github::{GITHUB_API_BASE, GitHubClient};
use crate::pipeline::FeedService;

/// Default server cache timeout in minutes.
pub const DEFAULT_CACHE_TIMEOUT_MINUTES: u64 = DEFAULT_TTL.as_secs() / 60;

/// Settings threaded into the feed pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base: String,
    pub cache_dir: PathBuf,
    /// None disables caching.
    pub cache_max_age: Option<Duration>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: GITHUB_API_BASE.to_string(),
            cache_dir: default_cache_dir(),
            cache_max_age: Some(DEFAULT_TTL),
        }
    }
}

impl Settings {
    /// Set the freshness window from a minute count, where 0 disables caching.
    pub fn with_cache_timeout_minutes(mut self, minutes: u64) -> Self {
        self.cache_max_age = (minutes > 0).then(|| Duration::from_secs(minutes * 60));
        self
    }

    /// Build the feed service backed by the GitHub API.
    /// The token is read from GITHUB_TOKEN when present.
    pub fn feed_service(&self) -> Result<FeedService<GitHubClient>> {
        let client = GitHubClient::from_env(&self.api_base)?;
        Ok(FeedService::new(
            CacheStore::new(&self.cache_dir),
            client,
            self.cache_max_age,
        ))
    }
}
