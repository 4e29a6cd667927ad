// Feed pipeline.
// Cache lookup, upstream fetch, cache write, filtering and rendering for one repository.

use std::time::Duration;

use crate::cache::CacheStore;
use crate::error::Result;
use crate::feed::{FeedDocument, FilterConfig, Modes, render, to_rss};
use crate::github::{IssueSource, RepoKey, parse_issues};

/// Produces feeds for repositories, caching upstream payloads on disk.
pub struct FeedService<S> {
    cache: CacheStore,
    source: S,
    /// Freshness window; None disables the cache entirely.
    cache_max_age: Option<Duration>,
}

impl<S: IssueSource> FeedService<S> {
    pub fn new(cache: CacheStore, source: S, cache_max_age: Option<Duration>) -> Self {
        Self {
            cache,
            source,
            cache_max_age,
        }
    }

    /// The upstream this service fetches from.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Raw issue payload for a repository, from cache when fresh.
    async fn issue_payload(&self, repo: &RepoKey) -> Result<Vec<u8>> {
        if let Some(max_age) = self.cache_max_age {
            match self.cache.load(repo, max_age) {
                Ok(Some(bytes)) => {
                    tracing::debug!("Serving {} from cache", repo);
                    return Ok(bytes);
                }
                Ok(None) => tracing::info!("Cache for {} is stale, fetching from GitHub", repo),
                Err(e) if e.is_not_found() => {
                    tracing::info!("No cache found for {}, fetching from GitHub", repo)
                }
                Err(e) => tracing::warn!("{}; fetching {} from GitHub", e, repo),
            }
        }

        let bytes = self.source.fetch(repo).await?;

        if self.cache_max_age.is_some() {
            if let Err(e) = self.cache.save(repo, &bytes) {
                tracing::warn!("Unable to cache issues for {}: {}", repo, e);
            }
        }

        Ok(bytes)
    }

    /// Build the feed document for a repository.
    pub async fn get_feed(
        &self,
        repo: &RepoKey,
        filters: &FilterConfig,
        modes: &Modes,
    ) -> Result<FeedDocument> {
        let bytes = self.issue_payload(repo).await?;
        let issues = filters.apply(parse_issues(&bytes)?);
        Ok(render(repo, &issues, modes))
    }

    /// Build the feed for a repository and serialize it as RSS.
    pub async fn get_rss(
        &self,
        repo: &RepoKey,
        filters: &FilterConfig,
        modes: &Modes,
    ) -> Result<String> {
        let doc = self.get_feed(repo, filters, modes).await?;
        to_rss(&doc)
    }
}
