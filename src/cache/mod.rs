// Cache module for local filesystem caching.
// Stores raw GitHub issue payloads to cut down on API calls.

pub mod paths;
pub mod store;

pub use paths::default_cache_dir;
pub use store::{CacheStore, DEFAULT_TTL, is_stale};
