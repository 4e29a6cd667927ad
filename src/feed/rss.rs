// RSS serialization.
// Writes a rendered feed document as an RSS 2.0 channel.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rss::{Channel, Guid, Item};

use crate::error::Result;

use super::render::{FeedDocument, FeedItem};

const CONTENT_NAMESPACE: &str = "http://purl.org/rss/1.0/modules/content/";

/// RFC 822 date as used by `pubDate`, e.g. `Wed, 08 Sep 2021 12:44:47 +0000`.
pub fn pub_date(time: DateTime<Utc>) -> String {
    time.format("%a, %d %b %Y %H:%M:%S %z").to_string()
}

/// Serialize a feed document to RSS XML.
pub fn to_rss(doc: &FeedDocument) -> Result<String> {
    let mut namespaces = BTreeMap::new();
    namespaces.insert("content".to_string(), CONTENT_NAMESPACE.to_string());

    let mut channel = Channel::default();
    channel.set_title(doc.title.clone());
    channel.set_link(doc.link.clone());
    channel.set_description(format!("Issues and pull requests for {}", doc.title));
    channel.set_pub_date(pub_date(doc.created));
    channel.set_namespaces(namespaces);
    channel.set_items(doc.items.iter().map(to_item).collect::<Vec<_>>());

    let buf = channel.pretty_write_to(Vec::new(), b' ', 2)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn to_item(entry: &FeedItem) -> Item {
    // Open and closed entries share a link, so the tag keeps their ids apart
    let mut guid = Guid::default();
    guid.set_value(format!("{}#{}", entry.link, entry.tag));
    guid.set_permalink(false);

    let mut item = Item::default();
    item.set_title(entry.title.clone());
    item.set_link(entry.link.clone());
    item.set_description(entry.description.clone());
    item.set_content(entry.content.clone());
    item.set_author(entry.author.clone());
    item.set_guid(guid);
    item.set_pub_date(entry.published.map(pub_date));
    item
}
