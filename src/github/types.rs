// GitHub API response types.
// Defines the issue record deserialized from the issues endpoint and the repository key.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::FeedError;

/// Repository identifier in `org/name` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoKey {
    pub org: String,
    pub name: String,
}

impl RepoKey {
    pub fn new(org: impl Into<String>, name: impl Into<String>) -> Result<Self, FeedError> {
        let org = org.into();
        let name = name.into();
        if !valid_segment(&org) || !valid_segment(&name) {
            return Err(FeedError::InvalidRepo(format!("{}/{}", org, name)));
        }
        Ok(Self { org, name })
    }

    /// Web URL of the repository.
    pub fn html_url(&self) -> String {
        format!("https://github.com/{}/{}", self.org, self.name)
    }
}

fn valid_segment(segment: &str) -> bool {
    !segment.is_empty() && segment != "." && segment != ".." && !segment.contains('/')
}

impl FromStr for RepoKey {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((org, name)) => Self::new(org, name),
            None => Err(FeedError::InvalidRepo(s.to_string())),
        }
    }
}

impl fmt::Display for RepoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.org, self.name)
    }
}

/// Issue lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IssueState {
    #[default]
    Open,
    Closed,
}

impl IssueState {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueState::Open => "open",
            IssueState::Closed => "closed",
        }
    }
}

/// Whether an entry is a plain issue or a pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    Issue,
    PullRequest,
}

impl IssueKind {
    /// Short name used in feed item tags.
    pub fn tag(&self) -> &'static str {
        match self {
            IssueKind::Issue => "issue",
            IssueKind::PullRequest => "pr",
        }
    }
}

/// GitHub user, reduced to the login.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub login: String,
}

/// Issue label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
}

/// Links present on issues that are actually pull requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestLinks {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
}

impl PullRequestLinks {
    fn is_empty(&self) -> bool {
        let blank = |link: &Option<String>| link.as_deref().is_none_or(str::is_empty);
        blank(&self.url) && blank(&self.html_url)
    }
}

/// GitHub issue or pull request from the `/issues` endpoint.
///
/// Only the fields the feed needs are modeled; everything else in the
/// payload is ignored. Timestamps stay as the raw strings and are parsed
/// with [`parse_timestamp`] when rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub number: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    /// Null for deleted accounts ("ghost").
    #[serde(default, deserialize_with = "null_as_default")]
    pub user: User,
    #[serde(default, deserialize_with = "null_as_default")]
    pub html_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub state: IssueState,
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub closed_at: Option<String>,
    #[serde(default)]
    pub pull_request: Option<PullRequestLinks>,
}

/// Read an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Issue {
    pub fn kind(&self) -> IssueKind {
        match &self.pull_request {
            Some(links) if !links.is_empty() => IssueKind::PullRequest,
            _ => IssueKind::Issue,
        }
    }

    pub fn author(&self) -> &str {
        &self.user.login
    }

    pub fn body(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }

    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|label| label.name == name)
    }
}

/// Parse an RFC 3339 timestamp from the API.
/// Returns None for missing, empty or malformed values.
pub fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw.filter(|s| !s.is_empty())?;
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parse a raw issues payload.
pub fn parse_issues(bytes: &[u8]) -> Result<Vec<Issue>, FeedError> {
    Ok(serde_json::from_slice(bytes)?)
}
