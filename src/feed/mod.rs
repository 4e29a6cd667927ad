// Feed module.
// Filtering, rendering and RSS serialization of issue lists.

pub mod filter;
pub mod modes;
pub mod render;
pub mod rss;

pub use filter::{FilterConfig, value_set};
pub use modes::Modes;
pub use render::{FeedDocument, FeedItem, ItemTag, render};
pub use self::rss::to_rss;
