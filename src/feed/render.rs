// Feed rendering.
// Turns filtered issues into ordered feed items according to the enabled modes.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::github::{Issue, IssueKind, IssueState, RepoKey, parse_timestamp};

use super::modes::Modes;

/// Kind and lifecycle state an item was emitted for, e.g. `pr-closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemTag {
    pub kind: IssueKind,
    pub state: IssueState,
}

impl fmt::Display for ItemTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.kind.tag(), self.state.as_str())
    }
}

/// One rendered feed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub tag: ItemTag,
    pub title: String,
    pub link: String,
    /// Body with newlines turned into `<br>`.
    pub description: String,
    /// Body as written.
    pub content: String,
    pub author: String,
    /// Creation time for open items, close time for closed ones. None when unknown.
    pub published: Option<DateTime<Utc>>,
}

/// A rendered feed, ready for serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedDocument {
    pub title: String,
    pub link: String,
    pub created: DateTime<Utc>,
    pub items: Vec<FeedItem>,
}

/// Render issues into a feed document, keeping input order.
///
/// A closed issue yields a closed item when its kind's closed mode is on,
/// and additionally an open item when its kind's open mode is on, so a
/// closed issue can appear twice.
pub fn render(repo: &RepoKey, issues: &[Issue], modes: &Modes) -> FeedDocument {
    let mut items = Vec::with_capacity(issues.len());

    for issue in issues {
        let kind = issue.kind();

        if issue.state == IssueState::Closed && modes.allows(kind, IssueState::Closed) {
            let closed_at = timestamp(issue, "closed_at", issue.closed_at.as_deref());
            items.push(item(issue, kind, IssueState::Closed, closed_at));
        }

        if modes.allows(kind, IssueState::Open) {
            let created_at = timestamp(issue, "created_at", issue.created_at.as_deref());
            items.push(item(issue, kind, IssueState::Open, created_at));
        }
    }

    FeedDocument {
        title: repo.to_string(),
        link: repo.html_url(),
        created: Utc::now(),
        items,
    }
}

fn item(
    issue: &Issue,
    kind: IssueKind,
    state: IssueState,
    published: Option<DateTime<Utc>>,
) -> FeedItem {
    let tag = ItemTag { kind, state };
    FeedItem {
        tag,
        title: format!("[{}]: {}", tag, issue.title),
        link: issue.html_url.clone(),
        description: issue.body().replace('\n', "<br>"),
        content: issue.body().to_string(),
        author: issue.author().to_string(),
        published,
    }
}

fn timestamp(issue: &Issue, field: &str, raw: Option<&str>) -> Option<DateTime<Utc>> {
    let parsed = parse_timestamp(raw);
    match raw {
        Some(raw) if parsed.is_none() && !raw.is_empty() => {
            tracing::warn!("Issue #{}: unparsable {} '{}'", issue.number, field, raw);
        }
        _ => {}
    }
    parsed
}
