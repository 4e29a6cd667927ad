// issues-rss library.
// Turns a GitHub repository's issues and pull requests into a filterable RSS feed.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod feed;
pub mod github;
pub mod pipeline;
pub mod server;

pub use error::{FeedError, Result};
pub use pipeline::FeedService;
