// Issue filtering.
// Label and author inclusion/exclusion, with exclusions always winning.

use std::collections::HashSet;

use crate::github::Issue;

/// Label and author constraints, all combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    /// Labels an issue must all carry.
    pub labels: HashSet<String>,
    /// Labels an issue must not carry.
    pub not_labels: HashSet<String>,
    /// If non-empty, the author must be one of these.
    pub users: HashSet<String>,
    /// Authors to drop.
    pub not_users: HashSet<String>,
}

impl FilterConfig {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
            && self.not_labels.is_empty()
            && self.users.is_empty()
            && self.not_users.is_empty()
    }

    /// Whether a single issue passes every constraint.
    pub fn matches(&self, issue: &Issue) -> bool {
        if issue
            .labels
            .iter()
            .any(|label| self.not_labels.contains(&label.name))
        {
            return false;
        }
        if self.not_users.contains(issue.author()) {
            return false;
        }
        if !self.labels.iter().all(|required| issue.has_label(required)) {
            return false;
        }
        if !self.users.is_empty() && !self.users.contains(issue.author()) {
            return false;
        }
        true
    }

    /// Keep the issues that match, preserving order.
    pub fn apply(&self, issues: Vec<Issue>) -> Vec<Issue> {
        if self.is_empty() {
            return issues;
        }
        issues
            .into_iter()
            .filter(|issue| self.matches(issue))
            .collect()
    }
}

/// Collect split, trimmed, non-empty values into a set.
/// Values may be repeated and may each hold a comma separated list.
pub fn value_set<I, S>(values: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .flat_map(|value| {
            value
                .as_ref()
                .split(',')
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from)
                .collect::<Vec<_>>()
        })
        .collect()
}
